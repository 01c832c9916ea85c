//! Core shared types for `car_model` (engine-agnostic).
// car_model/types.rs
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Planar vector, metres (or m/s, m/s^2) in whichever frame the caller says.
pub type Vec2 = Vector2<f64>;

/// Sign that keeps zero (and NaN) as-is.
///
/// `f64::signum` maps `+0.0` to `1.0`, which would inject a full steer
/// correction and a full brake push while the car is standing still.
#[inline]
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        x
    }
}

/// `min` where a NaN operand poisons the result (`f64::min` would drop it).
#[inline]
pub fn min_nan(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.min(b) }
}

/// `max` where a NaN operand poisons the result.
#[inline]
pub fn max_nan(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.max(b) }
}

// ============================================
// Heading <-> car frame
// ============================================

/// Rotation between world frame and car frame (x forward, y lateral),
/// pre-computed once per step from the heading.
#[derive(Debug, Clone, Copy)]
pub struct FrameRotation {
    pub sin: f64,
    pub cos: f64,
}

impl FrameRotation {
    #[inline]
    pub fn from_heading(heading: f64) -> Self {
        Self {
            sin: heading.sin(),
            cos: heading.cos(),
        }
    }

    /// World-frame vector -> car frame.
    #[inline]
    pub fn to_car(&self, world: Vec2) -> Vec2 {
        Vec2::new(
            self.cos * world.x + self.sin * world.y,
            self.cos * world.y - self.sin * world.x,
        )
    }

    /// Car-frame vector -> world frame.
    #[inline]
    pub fn to_world(&self, car: Vec2) -> Vec2 {
        Vec2::new(
            self.cos * car.x - self.sin * car.y,
            self.sin * car.x + self.cos * car.y,
        )
    }
}

// ============================================
// ----- inputs -------------------------------
// ============================================

/// Control inputs sampled once per step. Every axis is 0..1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputState {
    pub left: f64,
    pub right: f64,
    pub throttle: f64,
    pub brake: f64,
    #[serde(alias = "e_brake")]
    pub e_brake: f64,
}

impl InputState {
    /// Raw steer intent, -1 (full right) .. 1 (full left).
    #[inline]
    pub fn steer_intent(&self) -> f64 {
        self.left - self.right
    }

    /// Clamp every axis into 0..1. NaN is left alone.
    pub fn clamped(self) -> Self {
        Self {
            left: self.left.clamp(0.0, 1.0),
            right: self.right.clamp(0.0, 1.0),
            throttle: self.throttle.clamp(0.0, 1.0),
            brake: self.brake.clamp(0.0, 1.0),
            e_brake: self.e_brake.clamp(0.0, 1.0),
        }
    }
}

// ============================================
// ----- world bounds -------------------------
// ============================================

/// Visible play area in world units. x spans `0..width`, y spans `-height..0`
/// (screen y is flipped by the renderer).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Canvas pixels -> world units.
    pub fn from_canvas(canvas_width: f64, canvas_height: f64, draw_scale: f64) -> Self {
        Self {
            width: canvas_width / draw_scale,
            height: canvas_height / draw_scale,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, -(self.height / 2.0))
    }

    /// Toroidal wrap: leaving one edge re-enters at the opposite edge.
    pub fn wrap(&self, position: &mut Vec2) {
        if position.x < 0.0 {
            position.x = self.width;
        } else if position.x > self.width {
            position.x = 0.0;
        }

        if position.y < -self.height {
            position.y = 0.0;
        } else if position.y > 0.0 {
            position.y = -self.height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sign_is_zero_at_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(3.2), 1.0);
        assert_eq!(sign(-0.01), -1.0);
        assert!(sign(f64::NAN).is_nan());
    }

    #[test]
    fn nan_poisons_min_max() {
        assert_eq!(min_nan(1.0, 2.0), 1.0);
        assert_eq!(max_nan(1.0, 2.0), 2.0);
        assert!(min_nan(f64::NAN, 2.0).is_nan());
        assert!(max_nan(1.0, f64::NAN).is_nan());
    }

    #[test]
    fn frame_rotation_round_trips_quarter_turn() {
        let rot = FrameRotation::from_heading(std::f64::consts::FRAC_PI_2);
        let car = rot.to_car(Vec2::new(0.0, 3.0));
        assert_relative_eq!(car.x, 3.0, epsilon = 1e-12);
        assert_relative_eq!(car.y, 0.0, epsilon = 1e-12);

        let world = rot.to_world(car);
        assert_relative_eq!(world.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(world.y, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn wrap_moves_to_opposite_edge() {
        let vp = Viewport::new(100.0, 50.0);

        let mut p = Vec2::new(100.0001, -10.0);
        vp.wrap(&mut p);
        assert_eq!(p.x, 0.0);

        let mut p = Vec2::new(-0.0001, -10.0);
        vp.wrap(&mut p);
        assert_eq!(p.x, 100.0);

        let mut p = Vec2::new(10.0, 0.5);
        vp.wrap(&mut p);
        assert_eq!(p.y, -50.0);

        let mut p = Vec2::new(10.0, -50.5);
        vp.wrap(&mut p);
        assert_eq!(p.y, 0.0);

        // edges themselves are inside
        let mut p = Vec2::new(100.0, -50.0);
        vp.wrap(&mut p);
        assert_eq!(p, Vec2::new(100.0, -50.0));
    }

    #[test]
    fn canvas_pixels_scale_to_world_units() {
        let vp = Viewport::from_canvas(1000.0, 500.0, 10.0);
        assert_eq!(vp, Viewport::new(100.0, 50.0));
        assert_eq!(vp.center(), Vec2::new(50.0, -25.0));
    }
}
