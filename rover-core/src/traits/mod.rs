//! Hardware abstraction traits
//!
//! These traits define the interface between the rover logic and
//! hardware-specific implementations.

pub mod motor;
pub mod ranger;

pub use motor::DriveTrain;
pub use ranger::RangeSensor;
