use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::car_model::{SteeringFilter, VehicleOptions, VehicleParams, Viewport};
use crate::error::ConfigError;
use crate::vehicle::Livery;

/// Upper bound on the host tick rate.
pub const MAX_TICK_HZ: u32 = 1000;

/// Host settings. Every field is optional in the JSON file. Keys are
/// accepted in camelCase or snake_case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostConfig {
    #[serde(alias = "bind_addr")]
    pub bind_addr: String,
    #[serde(alias = "tick_hz")]
    pub tick_hz: u32,

    // --- Play area ---
    #[serde(alias = "canvas_width")]
    pub canvas_width: f64,  // px
    #[serde(alias = "canvas_height")]
    pub canvas_height: f64, // px
    #[serde(alias = "draw_scale")]
    pub draw_scale: f64,    // px per world unit

    // --- Assists for newly spawned cars ---
    #[serde(alias = "smooth_steer")]
    pub smooth_steer: bool,
    #[serde(alias = "safe_steer")]
    pub safe_steer: bool,

    /// Frame deltas above this (s) are treated as a stalled loop and replaced by 0.
    #[serde(alias = "max_frame_dt")]
    pub max_frame_dt: f64,

    #[serde(alias = "spawn_seed")]
    pub spawn_seed: Option<u64>,

    pub vehicle: VehicleOptions,
    pub livery: Livery,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:9001".into(),
            tick_hz: 60,
            canvas_width: 1280.0,
            canvas_height: 720.0,
            draw_scale: 10.0,
            smooth_steer: true,
            safe_steer: false,
            max_frame_dt: 1.0,
            spawn_seed: None,
            vehicle: VehicleOptions::default(),
            livery: Livery::default(),
        }
    }
}

impl HostConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: HostConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_hz == 0 || self.tick_hz > MAX_TICK_HZ {
            return Err(ConfigError::Validation(format!(
                "tick_hz must be in 1..={MAX_TICK_HZ} (got {})",
                self.tick_hz
            )));
        }
        if !(self.max_frame_dt > 0.0) {
            return Err(ConfigError::Validation(format!(
                "max_frame_dt must be > 0 (got {})",
                self.max_frame_dt
            )));
        }
        if !(self.draw_scale > 0.0) {
            return Err(ConfigError::Validation("draw_scale must be > 0".into()));
        }
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(ConfigError::Validation("canvas size must be > 0".into()));
        }
        self.vehicle_params().map(|_| ())
    }

    /// Period of the host loop. Only meaningful on a validated config.
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_hz.max(1) as f64)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::from_canvas(self.canvas_width, self.canvas_height, self.draw_scale)
    }

    pub fn steering(&self) -> SteeringFilter {
        SteeringFilter::new(self.smooth_steer, self.safe_steer)
    }

    pub fn vehicle_params(&self) -> Result<VehicleParams, ConfigError> {
        VehicleParams::new(self.vehicle.resolve())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_json_is_default() {
        assert_eq!(HostConfig::from_json("{}").unwrap(), HostConfig::default());
    }

    #[test]
    fn partial_json_overrides_fields() {
        let cfg = HostConfig::from_json(
            r#"{
                "bind_addr": "127.0.0.1:7000",
                "draw_scale": 20,
                "safe_steer": true,
                "vehicle": { "mass": 900, "tireGrip": 1.6 }
            }"#,
        )
        .unwrap();

        assert_eq!(cfg.bind_addr, "127.0.0.1:7000");
        assert_eq!(cfg.viewport(), Viewport::new(64.0, 36.0));
        assert_eq!(cfg.steering(), SteeringFilter::new(true, true));

        let params = cfg.vehicle_params().unwrap();
        assert_eq!(params.config().mass, 900.0);
        assert_eq!(params.config().tire_grip, 1.6);
        assert_eq!(params.derived().inertia, 900.0);
    }

    #[test]
    fn invalid_vehicle_is_rejected() {
        let err = HostConfig::from_json(r#"{"vehicle": {"cgToFrontAxle": 0, "cgToRearAxle": 0}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = HostConfig::from_json(r#"{"tick_hz": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = HostConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn tick_rate_must_give_a_nonzero_period() {
        let err = HostConfig::from_json(r#"{"tick_hz": 4000000000}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = HostConfig::from_json(r#"{"tickHz": 1001}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let cfg = HostConfig::from_json(r#"{"tickHz": 1000}"#).unwrap();
        assert_eq!(cfg.tick_period(), Duration::from_millis(1));
        assert!(HostConfig::default().tick_period() > Duration::ZERO);
    }

    #[test]
    fn stall_threshold_must_be_positive() {
        for bad in [r#"{"maxFrameDt": 0}"#, r#"{"max_frame_dt": -0.5}"#] {
            let err = HostConfig::from_json(bad).unwrap_err();
            assert!(matches!(err, ConfigError::Validation(_)));
        }
    }

    #[test]
    fn top_level_keys_accept_camel_case() {
        let cfg = HostConfig::from_json(
            r#"{
                "bindAddr": "127.0.0.1:7000",
                "tickHz": 30,
                "canvasWidth": 640,
                "canvasHeight": 480,
                "drawScale": 20,
                "smoothSteer": false,
                "safeSteer": true,
                "maxFrameDt": 0.25,
                "spawnSeed": 3
            }"#,
        )
        .unwrap();

        assert_eq!(cfg.bind_addr, "127.0.0.1:7000");
        assert_eq!(cfg.tick_hz, 30);
        assert_eq!(cfg.viewport(), Viewport::new(32.0, 24.0));
        assert_eq!(cfg.steering(), SteeringFilter::new(false, true));
        assert_eq!(cfg.max_frame_dt, 0.25);
        assert_eq!(cfg.spawn_seed, Some(3));

        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json["tickHz"], 30);
    }
}
