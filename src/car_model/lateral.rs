// ==============================================================================
// lateral.rs — SLIP ANGLES + LINEAR TIRE WITH HARD SATURATION
// ==============================================================================
// Slip angles (a.k.a. alpha), car frame:
//
//   front = atan2(vy_c + yaw_speed_front, |vx_c|) - sign(vx_c) * steer_angle
//   rear  = atan2(vy_c + yaw_speed_rear,  |vx_c|)
//
// |vx_c| in the denominator plus sign(vx_c) on the steer term keeps the angle
// continuous through reversing. sign(0) = 0: no steer term at standstill.
//
// Lateral force per axle:
//
//   Fy = clamp(-stiffness * alpha, -grip, grip) * axle_load
//
// The clamp is a hard corner, not a smooth curve; breakaway happens exactly at
// the grip boundary.
//
// E-brake locks the rear wheels and scales rear grip down toward lock_grip.
// ==============================================================================

use crate::car_model::config::VehicleConfig;
use crate::car_model::types::{max_nan, min_nan, sign, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlipAngles {
    pub front: f64, // rad
    pub rear: f64,  // rad
}

pub fn slip_angles(
    velocity_c: Vec2,
    yaw_speed_front: f64,
    yaw_speed_rear: f64,
    steer_angle: f64,
) -> SlipAngles {
    SlipAngles {
        front: (velocity_c.y + yaw_speed_front).atan2(velocity_c.x.abs())
            - sign(velocity_c.x) * steer_angle,
        rear: (velocity_c.y + yaw_speed_rear).atan2(velocity_c.x.abs()),
    }
}

/// (front, rear) grip envelope. `e_brake` in 0..1.
#[inline]
pub fn tire_grip(cfg: &VehicleConfig, e_brake: f64) -> (f64, f64) {
    (
        cfg.tire_grip,
        cfg.tire_grip * (1.0 - e_brake * (1.0 - cfg.lock_grip)),
    )
}

/// Saturated linear tire: |result| <= grip * axle_load.
#[inline]
pub fn lateral_force(corner_stiffness: f64, slip_angle: f64, grip: f64, axle_load: f64) -> f64 {
    // not f64::clamp: it panics on grip < 0 and would swallow NaN slip
    min_nan(max_nan(-corner_stiffness * slip_angle, -grip), grip) * axle_load
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::car_model::config::STANDARD;
    use approx::assert_relative_eq;

    #[test]
    fn straight_line_has_no_slip() {
        let slip = slip_angles(Vec2::new(20.0, 0.0), 0.0, 0.0, 0.0);
        assert_eq!(slip.front, 0.0);
        assert_eq!(slip.rear, 0.0);
    }

    #[test]
    fn steer_term_flips_when_reversing_and_vanishes_at_rest() {
        let fwd = slip_angles(Vec2::new(10.0, 0.0), 0.0, 0.0, 0.2);
        let rev = slip_angles(Vec2::new(-10.0, 0.0), 0.0, 0.0, 0.2);
        let rest = slip_angles(Vec2::new(0.0, 0.0), 0.0, 0.0, 0.2);

        assert_relative_eq!(fwd.front, -0.2);
        assert_relative_eq!(rev.front, 0.2);
        assert_eq!(rest.front, 0.0);
    }

    #[test]
    fn yaw_speed_feeds_each_axle() {
        let slip = slip_angles(Vec2::new(10.0, 0.0), 1.0, -1.0, 0.0);
        assert_relative_eq!(slip.front, (1.0f64).atan2(10.0));
        assert_relative_eq!(slip.rear, (-1.0f64).atan2(10.0));
    }

    #[test]
    fn lateral_force_never_exceeds_grip_envelope() {
        let load = 5886.0;
        let grip = 2.0;
        let mut alpha = -std::f64::consts::PI;
        while alpha <= std::f64::consts::PI {
            for stiffness in [0.5, 5.0, 5.2, 50.0, 5_000.0] {
                let f = lateral_force(stiffness, alpha, grip, load);
                assert!(f.abs() <= grip * load + 1e-9, "alpha={alpha} k={stiffness} f={f}");
            }
            alpha += 0.01;
        }
    }

    #[test]
    fn lateral_force_is_linear_below_saturation() {
        assert_relative_eq!(lateral_force(5.0, 0.1, 2.0, 1000.0), -500.0);
        assert_relative_eq!(lateral_force(5.0, -0.1, 2.0, 1000.0), 500.0);
        // saturated
        assert_relative_eq!(lateral_force(5.0, 1.0, 2.0, 1000.0), -2000.0);
    }

    #[test]
    fn nan_slip_propagates() {
        assert!(lateral_force(5.0, f64::NAN, 2.0, 1000.0).is_nan());
    }

    #[test]
    fn e_brake_reduces_only_rear_grip() {
        let (front, rear) = tire_grip(&STANDARD, 1.0);
        assert_eq!(front, 2.0);
        assert_relative_eq!(rear, 2.0 * 0.7);

        let (front, rear) = tire_grip(&STANDARD, 0.0);
        assert_eq!(front, rear);
    }
}
