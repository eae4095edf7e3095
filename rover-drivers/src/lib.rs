//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in rover-core, written against the pin and UART traits of rover-hal:
//!
//! - Motor drivers (dual H-bridge on four GPIO lines)
//! - Range sensors (HC-SR04 ultrasonic)
//! - Serial link (command bytes in, telemetry lines out)

#![no_std]
#![deny(unsafe_code)]

pub mod link;
pub mod motor;
pub mod ranger;
