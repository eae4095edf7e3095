//! RP2040-specific HAL for the rover firmware
//!
//! This crate provides RP2040 implementations of the shared `rover-hal`
//! traits, plus RP2040-specific setup:
//!
//! - Dynamic pin allocation for config-driven setup
//! - GPIO newtypes for outputs and the echo input
//! - Buffered UART adapters for the command/telemetry link

#![no_std]

pub mod gpio;
pub mod pins;
pub mod uart;

pub use gpio::{EchoPin, RpOutput};
pub use pins::{PinBank, PinBankPeripherals, PinError, RemainingPeripherals, BANK_PINS};
pub use uart::{RpUartRx, RpUartTx, UartBusError};
