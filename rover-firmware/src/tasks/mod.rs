//! Embassy async tasks

pub mod rover;

pub use rover::{rover_task, RoverDrive, RoverRanger};
