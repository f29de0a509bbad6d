mod collision;
mod craft;
mod flight;
mod history;
pub mod levels;
mod physics;
mod terrain;
mod vec2;

pub use collision::*;
pub use craft::*;
pub use flight::*;
pub use history::*;
pub use physics::*;
pub use terrain::*;
pub use vec2::*;
