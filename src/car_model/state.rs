use serde::Serialize;

use crate::car_model::types::Vec2;

/// Kinematic/dynamic state of one car. Mutated in place by `solve_step`,
/// read-only for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleState {
    pub position: Vec2,    // m, world
    pub velocity: Vec2,    // m/s, world
    pub velocity_c: Vec2,  // m/s, car frame (x forward, y lateral)
    pub accel: Vec2,       // m/s^2, world
    pub accel_c: Vec2,     // m/s^2, car frame
    pub heading: f64,      // rad
    pub yaw_rate: f64,     // rad/s
    pub steer: f64,        // -1..1 filtered steer
    pub steer_angle: f64,  // rad, front wheels
    pub abs_vel: f64,      // m/s, |velocity|
}

impl VehicleState {
    pub fn new(position: Vec2, heading: f64) -> Self {
        Self {
            position,
            velocity: Vec2::zeros(),
            velocity_c: Vec2::zeros(),
            accel: Vec2::zeros(),
            accel_c: Vec2::zeros(),
            heading,
            yaw_rate: 0.0,
            steer: 0.0,
            steer_angle: 0.0,
            abs_vel: 0.0,
        }
    }

    pub fn is_at_rest(&self) -> bool {
        self.abs_vel == 0.0 && self.yaw_rate == 0.0
    }
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::new(Vec2::zeros(), 0.0)
    }
}
