//! Drive states
//!
//! The rover has no speed control: each wheel is either driven forward,
//! driven backward or released, selected by the two inputs of its H-bridge.

pub mod state;

pub use state::{DriveState, MotorLevels};
