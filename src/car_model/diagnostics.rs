// ==============================================================================
// diagnostics.rs — PER-STEP TUNING / DISPLAY SNAPSHOT
// ------------------------------------------------------------------------------
// Pure derived output of one integrator step. Never fed back into state.
// Serialized as-is into the snapshot sent to clients.
// ==============================================================================

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub speed_kmh: f64,        // signed, car-frame forward speed at step start
    pub acceleration: f64,     // m/s^2, car-frame longitudinal
    pub yaw_rate: f64,         // rad/s, after integration
    pub weight_front: f64,     // N, front axle load
    pub weight_rear: f64,      // N, rear axle load
    pub slip_angle_front: f64, // rad
    pub slip_angle_rear: f64,  // rad
    pub friction_front: f64,   // N, front lateral tire force
    pub friction_rear: f64,    // N, rear lateral tire force
}

/// m/s -> km/h
#[inline]
pub fn to_kmh(mps: f64) -> f64 {
    mps * 3600.0 / 1000.0
}
