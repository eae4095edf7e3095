//! Ultrasonic ranging math
//!
//! Converts echo round-trip durations into distances and applies the
//! no-echo policy.

pub mod distance;

pub use distance::{round_trip_to_cm, DistancePolicy, DistanceReading, DEFAULT_NO_ECHO_CM};
