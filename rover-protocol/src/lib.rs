//! Rover Serial Protocol
//!
//! This crate defines the byte-level protocol spoken over the rover's serial
//! link. The protocol is deliberately tiny:
//!
//! ```text
//! host  ──► rover   one ASCII byte per command:  F  B  L  R  S
//! rover ──► host    one text line per loop:      D:<centimeters>\n
//! ```
//!
//! There is no framing, no checksum and no acknowledgement. Unknown command
//! bytes are dropped by the receiver. Telemetry lines are plain ASCII so the
//! link can be watched with any serial terminal.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod sender;
pub mod telemetry;

pub use command::MotionCommand;
pub use sender::CommandSender;
pub use telemetry::{DistanceLine, TelemetryError, TelemetryParser, MAX_LINE_LEN};
