use serde::{Deserialize, Serialize};

use crate::car_model::steering::steer_angle;
use crate::car_model::{
    solve_step, Diagnostics, InputState, SolveContext, SteeringFilter, Vec2, VehicleConfig,
    VehicleOptions, VehicleParams, VehicleState, Viewport,
};
use crate::error::ConfigError;

/// Render-only colours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Livery {
    pub body: String,
    pub wheels: [String; 4], // RL, RR, FL, FR
}

impl Default for Livery {
    fn default() -> Self {
        Self {
            body: "#ff0000".into(),
            wheels: ["#000".into(), "#000".into(), "#000".into(), "#000".into()],
        }
    }
}

pub struct Car {
    pub params: VehicleParams,     // validated config + derived values
    pub state: VehicleState,       // owned, mutated only by `update`
    pub steering: SteeringFilter,  // assists
    pub inputs: InputState,        // latest sampled inputs
    pub diagnostics: Diagnostics,  // last step
    pub livery: Livery,
}

impl Car {
    pub fn new(params: VehicleParams, position: Vec2, heading: f64) -> Self {
        Self {
            params,
            state: VehicleState::new(position, heading),
            steering: SteeringFilter::default(),
            inputs: InputState::default(),
            diagnostics: Diagnostics::default(),
            livery: Livery::default(),
        }
    }

    pub fn with_steering(mut self, steering: SteeringFilter) -> Self {
        self.steering = steering;
        self
    }

    pub fn with_livery(mut self, livery: Livery) -> Self {
        self.livery = livery;
        self
    }

    pub fn config(&self) -> &VehicleConfig {
        self.params.config()
    }

    /// Sample inputs for the next step.
    pub fn set_inputs(&mut self, inputs: InputState) {
        self.inputs = inputs;
    }

    /// Tuning panel edit. Takes effect from the next `update`.
    pub fn tune(&mut self, options: &VehicleOptions) -> Result<(), ConfigError> {
        self.params.apply(options)
    }

    /// One frame: steering filter -> steer angle -> integrator.
    pub fn update(&mut self, dt: f64, viewport: Viewport) -> &Diagnostics {
        let state = &mut self.state;

        state.steer = self.steering.update(
            state.steer,
            self.inputs.steer_intent(),
            state.abs_vel,
            dt,
        );
        state.steer_angle = steer_angle(state.steer, self.params.config().max_steer);

        let ctx = SolveContext::new(&self.params, viewport, dt);
        self.diagnostics = solve_step(&ctx, &self.inputs, state);
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn car() -> Car {
        Car::new(VehicleParams::default(), Vec2::new(50.0, -50.0), 0.0)
    }

    #[test]
    fn smoothed_steer_ramps_into_wheel_angle() {
        let mut car = car();
        car.set_inputs(InputState { left: 1.0, ..Default::default() });

        car.update(0.1, Viewport::new(100.0, 100.0));
        assert_relative_eq!(car.state.steer, 0.2);
        assert_relative_eq!(car.state.steer_angle, 0.2 * 0.6);
    }

    #[test]
    fn instant_steer_uses_raw_intent() {
        let mut car = car().with_steering(SteeringFilter::new(false, false));
        car.set_inputs(InputState { right: 1.0, ..Default::default() });

        car.update(0.1, Viewport::new(100.0, 100.0));
        assert_eq!(car.state.steer, -1.0);
        assert_relative_eq!(car.state.steer_angle, -0.6);
    }

    #[test]
    fn tune_rederives_before_next_step() {
        let mut car = car();
        car.tune(&VehicleOptions {
            cg_to_front_axle: Some(1.0),
            cg_to_rear_axle: Some(1.5),
            ..Default::default()
        })
        .unwrap();
        assert_relative_eq!(car.params.derived().axle_weight_ratio_front, 0.6);

        let diag = *car.update(1.0 / 60.0, Viewport::new(100.0, 100.0));
        assert_relative_eq!(diag.weight_front, 1200.0 * 0.6 * 9.81, epsilon = 1e-9);

        assert!(car.tune(&VehicleOptions { mass: Some(-1.0), ..Default::default() }).is_err());
        assert_eq!(car.config().mass, 1200.0);
    }
}
