//! car_model - engine-agnostic planar vehicle dynamics (pure types + solver)

pub mod types;
pub mod config;
pub mod params;
pub mod state;
pub mod steering;
pub mod axle;
pub mod lateral;
pub mod longitudinal;
pub mod diagnostics;
pub mod solve;

pub use types::*;
pub use config::{VehicleConfig, VehicleOptions, STANDARD};
pub use params::{DerivedParams, VehicleParams};
pub use state::VehicleState;
pub use steering::SteeringFilter;
pub use diagnostics::Diagnostics;
pub use solve::{solve_step, SolveContext};
