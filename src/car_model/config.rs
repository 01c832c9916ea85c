// ==============================================================================
// config.rs — VEHICLE PARAMETERS (PHYSICAL + TUNING)
// ------------------------------------------------------------------------------
// VehicleConfig: plain physical parameters, one per car, immutable during a
// step. Edited only through VehicleParams (params.rs) so derived values never
// go stale.
//
// VehicleOptions: partial form used by config files and the tuning panel.
// Missing fields fall back to STANDARD (or to the config being edited).
// ==============================================================================

use serde::{Deserialize, Serialize};

/// Lower bound for the locked-wheel grip fraction.
pub const MIN_LOCK_GRIP: f64 = 0.01;

/// Default e-brake force is the brake force divided by this.
pub const E_BRAKE_DIVISOR: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleConfig {
    pub gravity: f64,          // m/s^2
    pub mass: f64,             // kg
    pub inertia_scale: f64,    // inertia = mass * inertia_scale

    // --- Chassis (render + torque arms) ---
    pub half_width: f64,       // centre to side of chassis (m)
    pub cg_to_front: f64,      // cg to front of chassis (m)
    pub cg_to_rear: f64,       // cg to rear of chassis (m)
    pub cg_to_front_axle: f64, // m
    pub cg_to_rear_axle: f64,  // m
    pub cg_height: f64,        // m
    pub wheel_radius: f64,     // m, render only
    pub wheel_width: f64,      // m, render only

    // --- Tires ---
    pub tire_grip: f64,        // grip envelope, times axle load
    pub lock_grip: f64,        // 0.01..1 fraction of grip left on locked rear wheels

    // --- Drive / brakes ---
    pub engine_force: f64,     // N
    pub brake_force: f64,      // N
    pub e_brake_force: f64,    // N
    pub weight_transfer: f64,  // 0..1 share of longitudinal load transfer

    // --- Steering ---
    pub max_steer: f64,        // radians

    pub corner_stiffness_front: f64,
    pub corner_stiffness_rear: f64,

    // --- Resistance ---
    pub air_resist: f64,       // * v * |v|
    pub roll_resist: f64,      // * v
}

pub const STANDARD: VehicleConfig = VehicleConfig {
    gravity: 9.81,
    mass: 1200.0,
    inertia_scale: 1.0,

    half_width: 0.8,
    cg_to_front: 2.0,
    cg_to_rear: 2.0,
    cg_to_front_axle: 1.25,
    cg_to_rear_axle: 1.25,
    cg_height: 0.55,
    wheel_radius: 0.3,
    wheel_width: 0.2,

    tire_grip: 2.0,
    lock_grip: 0.7,

    engine_force: 8000.0,
    brake_force: 12000.0,
    e_brake_force: 12000.0 / E_BRAKE_DIVISOR,
    weight_transfer: 0.2,

    max_steer: 0.6,

    corner_stiffness_front: 5.0,
    corner_stiffness_rear: 5.2,

    air_resist: 2.5,
    roll_resist: 8.0,
};

impl Default for VehicleConfig {
    fn default() -> Self {
        STANDARD
    }
}

/// Partial vehicle parameters. Keys are accepted in camelCase or snake_case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleOptions {
    pub gravity: Option<f64>,
    pub mass: Option<f64>,
    #[serde(alias = "inertia_scale")]
    pub inertia_scale: Option<f64>,
    #[serde(alias = "half_width")]
    pub half_width: Option<f64>,
    #[serde(alias = "cg_to_front")]
    pub cg_to_front: Option<f64>,
    #[serde(alias = "cg_to_rear")]
    pub cg_to_rear: Option<f64>,
    #[serde(alias = "cg_to_front_axle")]
    pub cg_to_front_axle: Option<f64>,
    #[serde(alias = "cg_to_rear_axle")]
    pub cg_to_rear_axle: Option<f64>,
    #[serde(alias = "cg_height")]
    pub cg_height: Option<f64>,
    #[serde(alias = "wheel_radius")]
    pub wheel_radius: Option<f64>,
    #[serde(alias = "wheel_width")]
    pub wheel_width: Option<f64>,
    #[serde(alias = "tire_grip")]
    pub tire_grip: Option<f64>,
    #[serde(alias = "lock_grip")]
    pub lock_grip: Option<f64>,
    #[serde(alias = "engine_force")]
    pub engine_force: Option<f64>,
    #[serde(alias = "brake_force")]
    pub brake_force: Option<f64>,
    #[serde(alias = "e_brake_force")]
    pub e_brake_force: Option<f64>,
    #[serde(alias = "weight_transfer")]
    pub weight_transfer: Option<f64>,
    #[serde(alias = "max_steer")]
    pub max_steer: Option<f64>,
    #[serde(alias = "corner_stiffness_front")]
    pub corner_stiffness_front: Option<f64>,
    #[serde(alias = "corner_stiffness_rear")]
    pub corner_stiffness_rear: Option<f64>,
    #[serde(alias = "air_resist")]
    pub air_resist: Option<f64>,
    #[serde(alias = "roll_resist")]
    pub roll_resist: Option<f64>,
}

impl VehicleOptions {
    /// Fill every missing field from `STANDARD`.
    ///
    /// A missing e-brake force follows the resolved brake force.
    pub fn resolve(&self) -> VehicleConfig {
        let mut cfg = self.apply_to(&STANDARD);
        if self.e_brake_force.is_none() {
            cfg.e_brake_force = cfg.brake_force / E_BRAKE_DIVISOR;
        }
        cfg
    }

    /// Overlay the fields that are set onto `base`.
    pub fn apply_to(&self, base: &VehicleConfig) -> VehicleConfig {
        let mut cfg = *base;

        macro_rules! overlay {
            ($($field:ident),* $(,)?) => {
                $( if let Some(v) = self.$field { cfg.$field = v; } )*
            };
        }

        overlay!(
            gravity,
            mass,
            inertia_scale,
            half_width,
            cg_to_front,
            cg_to_rear,
            cg_to_front_axle,
            cg_to_rear_axle,
            cg_height,
            wheel_radius,
            wheel_width,
            tire_grip,
            engine_force,
            brake_force,
            e_brake_force,
            weight_transfer,
            max_steer,
            corner_stiffness_front,
            corner_stiffness_rear,
            air_resist,
            roll_resist,
        );

        if let Some(lock) = self.lock_grip {
            cfg.lock_grip = lock.clamp(MIN_LOCK_GRIP, 1.0);
        }

        cfg
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_options_resolve_to_standard() {
        assert_eq!(VehicleOptions::default().resolve(), STANDARD);
        assert_eq!(STANDARD.e_brake_force, 4800.0);
    }

    #[test]
    fn e_brake_follows_brake_force_when_unset() {
        let opts = VehicleOptions {
            brake_force: Some(10_000.0),
            ..Default::default()
        };
        let cfg = opts.resolve();
        assert_eq!(cfg.brake_force, 10_000.0);
        assert_eq!(cfg.e_brake_force, 4_000.0);

        let opts = VehicleOptions {
            brake_force: Some(10_000.0),
            e_brake_force: Some(9_000.0),
            ..Default::default()
        };
        assert_eq!(opts.resolve().e_brake_force, 9_000.0);
    }

    #[test]
    fn lock_grip_is_clamped() {
        let low = VehicleOptions { lock_grip: Some(0.0), ..Default::default() };
        assert_eq!(low.resolve().lock_grip, MIN_LOCK_GRIP);

        let high = VehicleOptions { lock_grip: Some(3.0), ..Default::default() };
        assert_eq!(high.resolve().lock_grip, 1.0);
    }

    #[test]
    fn options_accept_both_key_styles() {
        let camel: VehicleOptions =
            serde_json::from_str(r#"{"cgToFrontAxle": 1.1, "eBrakeForce": 100}"#).unwrap();
        let snake: VehicleOptions =
            serde_json::from_str(r#"{"cg_to_front_axle": 1.1, "e_brake_force": 100}"#).unwrap();
        assert_eq!(camel, snake);
        assert_eq!(camel.cg_to_front_axle, Some(1.1));
    }

    #[test]
    fn apply_to_keeps_unset_fields() {
        let base = VehicleOptions { mass: Some(900.0), ..Default::default() }.resolve();
        let edited = VehicleOptions { tire_grip: Some(1.5), ..Default::default() }.apply_to(&base);
        assert_eq!(edited.mass, 900.0);
        assert_eq!(edited.tire_grip, 1.5);
    }
}
