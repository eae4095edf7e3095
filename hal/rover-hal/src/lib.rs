//! Rover Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the rover logic is written
//! against. Chip-specific crates implement them for real peripherals and
//! the unit tests implement them with mocks, so the command interpreter and
//! the range sampler never touch a register directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  rover-firmware                         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  rover-drivers (H-bridge, HC-SR04, link)│
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  rover-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ rover-hal-    │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`pulse::PulseIn`] - Pulse width measurement on an input line
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pulse;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, Level, OutputPin};
pub use pulse::{measure_high, PulseIn};
pub use uart::{UartConfig, UartRx, UartTx};
