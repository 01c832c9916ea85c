// ==============================================================================
// solve.rs — ONE INTEGRATION STEP OF THE PLANAR BICYCLE MODEL
// ==============================================================================
// ------------------------------------------------------------------------------
// Per step, in this exact order:
//  1) world velocity -> car frame (heading)
//  2) axle loads with weight transfer from LAST step's ax_c   (axle.rs)
//  3) yaw-induced axle speeds                                  (axle.rs)
//  4) slip angles                                              (lateral.rs)
//  5) rear grip reduced by e-brake                             (lateral.rs)
//  6) saturated lateral tire forces                            (lateral.rs)
//  7) drive / brake traction, RWD                              (longitudinal.rs)
//  8) rolling + air resistance                                 (longitudinal.rs)
//  9) sum in car frame; front force projected by cos(steer)
// 10) a_c = F / m, rotate back to world
// 11) v += a * dt (semi-implicit Euler), |v|
// 12) yaw torque from axle forces
// 13) low-speed stop: |v| < LOW_SPEED_STOP and no throttle => v, |v|, torque,
//     yaw rate forced to 0 (before torque -> angular accel)
//     yaw_rate += torque / I * dt ; heading += yaw_rate * dt
// 14) p += v * dt
// 15) toroidal wrap against the viewport
// 16) diagnostics
//
// No validation of inputs: NaN in, NaN out. dt is used as given.
// ==============================================================================

use crate::car_model::axle::{axle_loads, yaw_speeds};
use crate::car_model::config::VehicleConfig;
use crate::car_model::diagnostics::{to_kmh, Diagnostics};
use crate::car_model::lateral::{lateral_force, slip_angles, tire_grip};
use crate::car_model::longitudinal::{drag, traction};
use crate::car_model::params::{DerivedParams, VehicleParams};
use crate::car_model::state::VehicleState;
use crate::car_model::types::{FrameRotation, InputState, Vec2, Viewport};

/// Below this speed (m/s) with no throttle the car is put to rest.
pub const LOW_SPEED_STOP: f64 = 0.5;

#[derive(Debug, Clone, Copy)]
pub struct SolveContext<'a> {
    pub dt: f64, // s
    pub config: &'a VehicleConfig,
    pub derived: &'a DerivedParams,
    pub viewport: Viewport,
}

impl<'a> SolveContext<'a> {
    pub fn new(params: &'a VehicleParams, viewport: Viewport, dt: f64) -> Self {
        Self {
            dt,
            config: params.config(),
            derived: params.derived(),
            viewport,
        }
    }
}

/// Advance `state` by `ctx.dt` using `state.steer_angle` as the front wheel
/// angle.
pub fn solve_step(ctx: &SolveContext, inputs: &InputState, state: &mut VehicleState) -> Diagnostics {
    let cfg = ctx.config;
    let dt = ctx.dt;
    let steer_angle = state.steer_angle;

    // --------------------------------------------------
    // Car frame
    // --------------------------------------------------
    let rot = FrameRotation::from_heading(state.heading);
    state.velocity_c = rot.to_car(state.velocity);

    // --------------------------------------------------
    // Loads, slip, lateral forces
    // --------------------------------------------------
    let loads = axle_loads(cfg, ctx.derived, state.accel_c.x);
    let (yaw_speed_front, yaw_speed_rear) = yaw_speeds(cfg, state.yaw_rate);
    let slip = slip_angles(state.velocity_c, yaw_speed_front, yaw_speed_rear, steer_angle);

    let (grip_front, grip_rear) = tire_grip(cfg, inputs.e_brake);
    let friction_front = lateral_force(cfg.corner_stiffness_front, slip.front, grip_front, loads.front);
    let friction_rear = lateral_force(cfg.corner_stiffness_rear, slip.rear, grip_rear, loads.rear);

    // --------------------------------------------------
    // Longitudinal + resistance
    // --------------------------------------------------
    let drive = traction(cfg, inputs, state.velocity_c);
    let resist = drag(cfg, state.velocity_c);

    let total_force = Vec2::new(
        resist.x + drive.force.x,
        resist.y + drive.force.y + steer_angle.cos() * friction_front + friction_rear,
    );

    // --------------------------------------------------
    // Linear integration
    // --------------------------------------------------
    state.accel_c = Vec2::new(total_force.x / cfg.mass, total_force.y / cfg.mass);
    state.accel = rot.to_world(state.accel_c);

    state.velocity.x += state.accel.x * dt;
    state.velocity.y += state.accel.y * dt;
    state.abs_vel = state.velocity.magnitude();

    // --------------------------------------------------
    // Yaw
    // --------------------------------------------------
    let mut angular_torque = (friction_front + drive.force.y) * cfg.cg_to_front_axle
        - friction_rear * cfg.cg_to_rear_axle;

    // NaN throttle counts as released
    let no_throttle = drive.throttle == 0.0 || drive.throttle.is_nan();
    if state.abs_vel.abs() < LOW_SPEED_STOP && no_throttle {
        state.velocity = Vec2::zeros();
        state.abs_vel = 0.0;
        angular_torque = 0.0;
        state.yaw_rate = 0.0;
    }

    let angular_accel = angular_torque / ctx.derived.inertia;
    state.yaw_rate += angular_accel * dt;
    state.heading += state.yaw_rate * dt;

    // --------------------------------------------------
    // Position
    // --------------------------------------------------
    state.position.x += state.velocity.x * dt;
    state.position.y += state.velocity.y * dt;
    ctx.viewport.wrap(&mut state.position);

    Diagnostics {
        speed_kmh: to_kmh(state.velocity_c.x),
        acceleration: state.accel_c.x,
        yaw_rate: state.yaw_rate,
        weight_front: loads.front,
        weight_rear: loads.rear,
        slip_angle_front: slip.front,
        slip_angle_rear: slip.rear,
        friction_front,
        friction_rear,
    }
}
