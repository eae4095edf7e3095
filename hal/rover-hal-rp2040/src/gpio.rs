//! GPIO adapters
//!
//! Newtypes over embassy-rp pins so the `rover-hal` traits can be
//! implemented for them.

use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pull};
use embassy_rp::Peri;
use embassy_time::Instant;
use rover_hal::{measure_high, InputPin, OutputPin, PulseIn};

/// Push-pull output, initially LOW
pub struct RpOutput(Output<'static>);

impl RpOutput {
    pub fn new(pin: Peri<'static, AnyPin>) -> Self {
        Self(Output::new(pin, Level::Low))
    }
}

impl OutputPin for RpOutput {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Ranger echo input
///
/// Pulse widths are timed by busy-polling the pin against the embassy time
/// driver, so the caller's task blocks for at most the timeout.
pub struct EchoPin(Input<'static>);

impl EchoPin {
    /// Floating input; the HC-SR04 drives the echo line actively
    pub fn new(pin: Peri<'static, AnyPin>) -> Self {
        Self(Input::new(pin, Pull::None))
    }
}

impl InputPin for EchoPin {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

impl PulseIn for EchoPin {
    fn pulse_in_high(&mut self, timeout_us: u32) -> u32 {
        measure_high(&*self, timeout_us, || Instant::now().as_micros())
    }
}
