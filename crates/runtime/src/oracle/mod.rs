//! Reference collaborators handed to the core through `GameEnv`.

mod fov;
mod generator;
mod messages;
mod path;

pub use fov::LineOfSightFov;
pub use generator::RoomsAndCorridors;
pub use messages::BoundedLog;
pub use path::BfsPathfinder;
