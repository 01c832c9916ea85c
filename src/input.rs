// ==============================================================================
// input.rs — KEYBOARD / WIRE INPUT -> InputState
// ------------------------------------------------------------------------------
// Key map (browser KeyboardEvent.code):
//   ArrowUp    / KeyW  -> throttle
//   ArrowDown  / KeyS  -> brake
//   ArrowLeft  / KeyA  -> left
//   ArrowRight / KeyD  -> right
//   Space              -> e-brake
//
// The core only ever sees the InputState produced here, sampled once per tick.
// ==============================================================================

use serde::Deserialize;

use crate::car_model::InputState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    Space,
}

impl Control {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" | "KeyW" => Some(Control::Up),
            "ArrowDown" | "KeyS" => Some(Control::Down),
            "ArrowLeft" | "KeyA" => Some(Control::Left),
            "ArrowRight" | "KeyD" => Some(Control::Right),
            "Space" => Some(Control::Space),
            _ => None,
        }
    }
}

/// Held keys of one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub space: bool,
}

impl KeyboardState {
    /// Apply a key-down (`pressed = true`) or key-up event.
    /// Returns false for codes outside the key map.
    pub fn handle_key(&mut self, code: &str, pressed: bool) -> bool {
        let Some(control) = Control::from_code(code) else {
            return false;
        };

        match control {
            Control::Up => self.up = pressed,
            Control::Down => self.down = pressed,
            Control::Left => self.left = pressed,
            Control::Right => self.right = pressed,
            Control::Space => self.space = pressed,
        }
        true
    }

    pub fn to_input(&self) -> InputState {
        let axis = |held: bool| if held { 1.0 } else { 0.0 };
        InputState {
            left: axis(self.left),
            right: axis(self.right),
            throttle: axis(self.up),
            brake: axis(self.down),
            e_brake: axis(self.space),
        }
    }
}

/// One axis as sent by a client: a number or a held/not-held boolean.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Axis {
    Held(bool),
    Value(f64),
}

impl Axis {
    pub fn value(self) -> f64 {
        match self {
            Axis::Held(true) => 1.0,
            Axis::Held(false) => 0.0,
            Axis::Value(v) => v,
        }
    }
}

impl Default for Axis {
    fn default() -> Self {
        Axis::Value(0.0)
    }
}

/// Wire form of a full input sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AxisInput {
    pub left: Axis,
    pub right: Axis,
    pub throttle: Axis,
    pub brake: Axis,
    #[serde(alias = "e_brake")]
    pub e_brake: Axis,
}

impl AxisInput {
    /// Normalized input, every axis clamped into 0..1.
    pub fn to_input(&self) -> InputState {
        InputState {
            left: self.left.value(),
            right: self.right.value(),
            throttle: self.throttle.value(),
            brake: self.brake.value(),
            e_brake: self.e_brake.value(),
        }
        .clamped()
    }
}
