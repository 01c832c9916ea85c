// ==============================================================================
// axle.rs — AXLE LOADS WITH LONGITUDINAL WEIGHT TRANSFER
// ------------------------------------------------------------------------------
// Static load comes from the cg position (axle weight ratios). Longitudinal
// acceleration moves load between the axles:
//
//   transfer = weight_transfer * ax_c * cg_height / wheel_base
//   front    = mass * (ratio_front * g - transfer)
//   rear     = mass * (ratio_rear  * g + transfer)
//
// ax_c is the car-frame acceleration from the PREVIOUS step (one-step lag,
// semi-implicit). Total load stays mass * g.
//
// Yaw-induced axle speeds are the lateral velocity each axle sees purely
// from body rotation.
// ==============================================================================

use crate::car_model::config::VehicleConfig;
use crate::car_model::params::DerivedParams;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxleLoads {
    pub front: f64, // N
    pub rear: f64,  // N
}

pub fn axle_loads(cfg: &VehicleConfig, derived: &DerivedParams, accel_cx: f64) -> AxleLoads {
    AxleLoads {
        front: cfg.mass
            * (derived.axle_weight_ratio_front * cfg.gravity
                - cfg.weight_transfer * accel_cx * cfg.cg_height / derived.wheel_base),
        rear: cfg.mass
            * (derived.axle_weight_ratio_rear * cfg.gravity
                + cfg.weight_transfer * accel_cx * cfg.cg_height / derived.wheel_base),
    }
}

/// (front, rear) lateral speed from yaw: v = yaw_rate * r.
#[inline]
pub fn yaw_speeds(cfg: &VehicleConfig, yaw_rate: f64) -> (f64, f64) {
    (cfg.cg_to_front_axle * yaw_rate, -cfg.cg_to_rear_axle * yaw_rate)
}
