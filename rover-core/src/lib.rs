//! Board-agnostic core logic for the rover firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Drive states and their motor pin patterns
//! - Echo duration to distance conversion
//! - Hardware abstraction traits (drive train, range sensor)
//! - The [`Rover`] context that owns the command/sensor loop state
//! - Configuration types and the `rover.toml` parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod drive;
pub mod ranging;
pub mod rover;
pub mod traits;

pub use rover::{CommandOutcome, Iteration, Rover};
