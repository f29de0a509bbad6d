//! Fixed-tick 2D rocket lander: craft physics, polyline terrain, landing
//! classification and the Playing/Crashed flight state machine.

mod app;
pub mod error;
pub mod init;
pub mod input;
pub mod render;
pub mod simulation;
pub mod timing;

pub use app::*;
pub use error::{ConfigError, TerrainError};
pub use simulation::*;
