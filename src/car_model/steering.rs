// ==============================================================================
// steering.rs — DRIVER STEER INTENT -> FILTERED STEER
// ==============================================================================
// Responsibilities:
// - Optional smoothing: ramp toward the input, relax back to centre
// - Optional speed-sensitive attenuation ("safe steer")
// - Map filtered steer (-1..1) onto the front wheel angle
// ------------------------------------------------------------------------------
// Order matters: smoothing runs first, attenuation is applied to its result.
// Attenuation uses |v| from the previous integration step since the filter
// runs before the integrator in the same frame.
//
//   smooth:  steer' = clamp(steer + input * dt * STEER_RATE, -1, 1)   |input| > deadzone
//            steer' = steer -> 0 at RETURN_RATE, never past 0         otherwise
//   safe:    steer' = steer * (1 - min(|v|, SAFE_SPEED_CAP) / SAFE_SPEED_FALLOFF)
//   angle  = steer' * max_steer
// ==============================================================================

use serde::{Deserialize, Serialize};

use crate::car_model::types::{max_nan, min_nan};

pub const STEER_RATE: f64 = 2.0;         // per second toward input
pub const RETURN_RATE: f64 = 1.0;        // per second back to centre
pub const STEER_DEADZONE: f64 = 0.001;
pub const SAFE_SPEED_CAP: f64 = 250.0;   // m/s
pub const SAFE_SPEED_FALLOFF: f64 = 280.0;

/// Steering assists (per car).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SteeringFilter {
    pub smooth: bool, // rate-limit + auto-centre
    pub safe: bool,   // reduce lock with speed
}

impl Default for SteeringFilter {
    fn default() -> Self {
        Self {
            smooth: true,
            safe: false,
        }
    }
}

impl SteeringFilter {
    pub fn new(smooth: bool, safe: bool) -> Self {
        Self { smooth, safe }
    }

    /// One filter step. `abs_vel` is the speed from the previous step.
    pub fn update(&self, current_steer: f64, steer_input: f64, abs_vel: f64, dt: f64) -> f64 {
        let mut steer = if self.smooth {
            smooth_steer(current_steer, steer_input, dt)
        } else {
            steer_input
        };

        if self.safe {
            steer = safe_steer(steer, abs_vel);
        }

        steer
    }
}

/// Ramp toward the input while it is held, otherwise relax to centre.
pub fn smooth_steer(current_steer: f64, steer_input: f64, dt: f64) -> f64 {
    if steer_input.abs() > STEER_DEADZONE {
        (current_steer + steer_input * dt * STEER_RATE).clamp(-1.0, 1.0)
    } else if current_steer > 0.0 {
        max_nan(current_steer - dt * RETURN_RATE, 0.0)
    } else if current_steer < 0.0 {
        min_nan(current_steer + dt * RETURN_RATE, 0.0)
    } else {
        0.0
    }
}

/// Linear falloff of steer authority with speed.
pub fn safe_steer(steer: f64, abs_vel: f64) -> f64 {
    steer * (1.0 - min_nan(abs_vel, SAFE_SPEED_CAP) / SAFE_SPEED_FALLOFF)
}

/// Filtered steer -> front wheel angle (rad).
#[inline]
pub fn steer_angle(steer: f64, max_steer: f64) -> f64 {
    steer * max_steer
}
