// ==============================================================================
// params.rs — VALIDATED CONFIG + DERIVED VALUES
// ------------------------------------------------------------------------------
// VehicleParams is the only way a config reaches the integrator. Every
// construction and every edit re-validates and re-derives:
//
//   inertia                 = mass * inertia_scale
//   wheel_base              = cg_to_front_axle + cg_to_rear_axle
//   axle_weight_ratio_front = cg_to_rear_axle  / wheel_base
//   axle_weight_ratio_rear  = cg_to_front_axle / wheel_base
//
// A rejected edit leaves the previous params untouched.
// ==============================================================================

use crate::car_model::config::{VehicleConfig, VehicleOptions, MIN_LOCK_GRIP};
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedParams {
    pub inertia: f64,                 // kg*m^2
    pub wheel_base: f64,              // m
    pub axle_weight_ratio_front: f64, // share of weight on the front axle
    pub axle_weight_ratio_rear: f64,  // share of weight on the rear axle
}

impl DerivedParams {
    pub fn from_config(cfg: &VehicleConfig) -> Self {
        let wheel_base = cfg.cg_to_front_axle + cfg.cg_to_rear_axle;
        Self {
            inertia: cfg.mass * cfg.inertia_scale,
            wheel_base,
            axle_weight_ratio_front: cfg.cg_to_rear_axle / wheel_base,
            axle_weight_ratio_rear: cfg.cg_to_front_axle / wheel_base,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleParams {
    config: VehicleConfig,
    derived: DerivedParams,
}

fn positive(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{name} must be finite and > 0 (got {value})"
        )))
    }
}

impl VehicleParams {
    pub fn new(mut config: VehicleConfig) -> Result<Self, ConfigError> {
        positive("mass", config.mass)?;
        positive("inertia_scale", config.inertia_scale)?;

        let derived = DerivedParams::from_config(&config);
        positive("inertia", derived.inertia)?;
        positive("wheel_base", derived.wheel_base)?;

        config.lock_grip = config.lock_grip.clamp(MIN_LOCK_GRIP, 1.0);

        Ok(Self { config, derived })
    }

    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    pub fn derived(&self) -> &DerivedParams {
        &self.derived
    }

    /// Replace the whole config.
    pub fn set_config(&mut self, config: VehicleConfig) -> Result<(), ConfigError> {
        *self = Self::new(config)?;
        Ok(())
    }

    /// Edit the config in place (tuning panel path).
    pub fn edit(&mut self, f: impl FnOnce(&mut VehicleConfig)) -> Result<(), ConfigError> {
        let mut next = self.config;
        f(&mut next);
        self.set_config(next)
    }

    /// Overlay partial options.
    pub fn apply(&mut self, options: &VehicleOptions) -> Result<(), ConfigError> {
        self.edit(|cfg| *cfg = options.apply_to(cfg))
    }
}

impl Default for VehicleParams {
    fn default() -> Self {
        let config = VehicleConfig::default();
        Self {
            config,
            derived: DerivedParams::from_config(&config),
        }
    }
}
