//! Pulse width measurement
//!
//! Ultrasonic rangers encode the echo round trip as the width of a HIGH
//! pulse on their echo line. This trait measures that width with a bounded
//! wait so a missing echo can never stall the caller for longer than the
//! timeout.

use crate::gpio::InputPin;

/// Input line whose HIGH pulse width can be measured
pub trait PulseIn {
    /// Measure how long the line stays HIGH, in microseconds
    ///
    /// Waits for the line to go HIGH, then for it to go LOW again. The
    /// whole measurement, including the wait for the rising edge, is bounded
    /// by `timeout_us`.
    ///
    /// Returns 0 if no complete pulse was seen within the timeout. A zero
    /// return is the only "no echo" signal; there is no separate error.
    fn pulse_in_high(&mut self, timeout_us: u32) -> u32;
}

/// Measure a HIGH pulse on `pin` against a free-running microsecond clock
///
/// If the line is already HIGH when called, that pulse is skipped and the
/// next one measured. All three waits share one deadline of `timeout_us`
/// from the first clock read. Returns 0 on timeout.
pub fn measure_high<P, C>(pin: &P, timeout_us: u32, mut now_us: C) -> u32
where
    P: InputPin + ?Sized,
    C: FnMut() -> u64,
{
    let deadline = now_us().saturating_add(u64::from(timeout_us));

    // Let any pulse already in progress finish
    while pin.is_high() {
        if now_us() >= deadline {
            return 0;
        }
    }

    while pin.is_low() {
        if now_us() >= deadline {
            return 0;
        }
    }
    let rise = now_us();

    while pin.is_high() {
        if now_us() >= deadline {
            return 0;
        }
    }
    let width = now_us().saturating_sub(rise);

    u32::try_from(width).unwrap_or(u32::MAX)
}
