//! Range sensor implementations

pub mod hcsr04;

pub use hcsr04::{HcSr04, HcSr04Config};
