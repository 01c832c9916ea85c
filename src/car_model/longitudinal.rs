// ==============================================================================
// longitudinal.rs — DRIVE, BRAKE AND RESISTANCE FORCES (CAR FRAME)
// ==============================================================================
// Rear-wheel drive only, so traction has no lateral term.
//
//   brake      = min(brake * brake_force + e_brake * e_brake_force, brake_force)
//   traction_x = throttle * engine_force - brake * sign(vx_c)
//   drag       = -roll_resist * v - air_resist * v * |v|      (per axis)
//
// Brake + e-brake is capped at brake_force, not summed past it. Brakes oppose
// motion (sign of vx_c), never push a stationary car.
// ==============================================================================

use crate::car_model::config::VehicleConfig;
use crate::car_model::types::{min_nan, sign, InputState, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Traction {
    pub throttle: f64, // N, engine
    pub force: Vec2,   // N, car frame
}

/// Combined brake force, capped at `brake_force`.
#[inline]
pub fn brake_force(cfg: &VehicleConfig, inputs: &InputState) -> f64 {
    min_nan(
        inputs.brake * cfg.brake_force + inputs.e_brake * cfg.e_brake_force,
        cfg.brake_force,
    )
}

pub fn traction(cfg: &VehicleConfig, inputs: &InputState, velocity_c: Vec2) -> Traction {
    let brake = brake_force(cfg, inputs);
    let throttle = inputs.throttle * cfg.engine_force;

    Traction {
        throttle,
        force: Vec2::new(throttle - brake * sign(velocity_c.x), 0.0),
    }
}

/// Rolling + air resistance, both axes.
pub fn drag(cfg: &VehicleConfig, velocity_c: Vec2) -> Vec2 {
    Vec2::new(
        -cfg.roll_resist * velocity_c.x - cfg.air_resist * velocity_c.x * velocity_c.x.abs(),
        -cfg.roll_resist * velocity_c.y - cfg.air_resist * velocity_c.y * velocity_c.y.abs(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::car_model::config::STANDARD;
    use approx::assert_relative_eq;

    fn inputs(throttle: f64, brake: f64, e_brake: f64) -> InputState {
        InputState {
            throttle,
            brake,
            e_brake,
            ..Default::default()
        }
    }

    #[test]
    fn brake_plus_e_brake_is_capped() {
        let cfg = VehicleConfig {
            brake_force: 12_000.0,
            e_brake_force: 4_800.0,
            ..STANDARD
        };
        assert_eq!(brake_force(&cfg, &inputs(0.0, 1.0, 1.0)), 12_000.0);
        assert_eq!(brake_force(&cfg, &inputs(0.0, 0.0, 1.0)), 4_800.0);
        assert_eq!(brake_force(&cfg, &inputs(0.0, 0.5, 0.0)), 6_000.0);

        let t = traction(&cfg, &inputs(0.0, 1.0, 1.0), Vec2::new(10.0, 0.0));
        assert_eq!(t.force.x, -12_000.0);
    }

    #[test]
    fn brakes_oppose_motion_and_idle_at_rest() {
        let fwd = traction(&STANDARD, &inputs(0.0, 1.0, 0.0), Vec2::new(5.0, 0.0));
        let rev = traction(&STANDARD, &inputs(0.0, 1.0, 0.0), Vec2::new(-5.0, 0.0));
        let rest = traction(&STANDARD, &inputs(0.0, 1.0, 0.0), Vec2::zeros());

        assert_eq!(fwd.force.x, -12_000.0);
        assert_eq!(rev.force.x, 12_000.0);
        assert_eq!(rest.force.x, 0.0);
        assert_eq!(rest.force.y, 0.0);
    }

    #[test]
    fn throttle_scales_engine_force() {
        let t = traction(&STANDARD, &inputs(0.5, 0.0, 0.0), Vec2::new(3.0, 1.0));
        assert_eq!(t.throttle, 4_000.0);
        assert_eq!(t.force, Vec2::new(4_000.0, 0.0));
    }

    #[test]
    fn drag_opposes_velocity_on_both_axes() {
        let d = drag(&STANDARD, Vec2::new(10.0, -2.0));
        assert_relative_eq!(d.x, -8.0 * 10.0 - 2.5 * 100.0);
        assert_relative_eq!(d.y, 8.0 * 2.0 + 2.5 * 4.0);
    }
}
