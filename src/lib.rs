//! Planar single-vehicle driving simulation plus the WebSocket host that
//! feeds it input and streams its state to renderers.

pub mod car_model;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod net;
pub mod spawn;
pub mod state;
pub mod vehicle;
pub mod world;
