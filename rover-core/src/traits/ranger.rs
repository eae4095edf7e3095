//! Range sensor trait

/// Trait for echo-timing distance sensors (HC-SR04 and similar)
pub trait RangeSensor {
    /// Fire one ping and time its echo
    ///
    /// Returns the round-trip duration in microseconds, or 0 if no echo
    /// arrived within the sensor's timeout.
    fn ping(&mut self) -> u32;
}
