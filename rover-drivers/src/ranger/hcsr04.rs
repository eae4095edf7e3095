//! HC-SR04 ultrasonic ranger
//!
//! One measurement is: hold trigger LOW briefly, pulse it HIGH for at least
//! 10 µs, then time the HIGH pulse on the echo line. The echo width is the
//! sound's round trip in microseconds.

use embedded_hal::delay::DelayNs;
use rover_core::config::RangerConfig;
use rover_core::traits::RangeSensor;
use rover_hal::{OutputPin, PulseIn};

/// Trigger and echo timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HcSr04Config {
    /// LOW time before the trigger pulse (µs)
    pub settle_us: u32,
    /// Trigger pulse HIGH time (µs)
    pub trigger_pulse_us: u32,
    /// Longest wait for a complete echo pulse (µs)
    pub echo_timeout_us: u32,
}

impl Default for HcSr04Config {
    fn default() -> Self {
        Self {
            settle_us: 2,
            trigger_pulse_us: 10,
            echo_timeout_us: 30_000,
        }
    }
}

impl From<&RangerConfig> for HcSr04Config {
    fn from(config: &RangerConfig) -> Self {
        Self {
            settle_us: config.settle_us,
            trigger_pulse_us: config.trigger_pulse_us,
            echo_timeout_us: config.echo_timeout_us,
        }
    }
}

/// HC-SR04 on a trigger output and an echo input
pub struct HcSr04<T, E, D> {
    trigger: T,
    echo: E,
    delay: D,
    config: HcSr04Config,
}

impl<T, E, D> HcSr04<T, E, D>
where
    T: OutputPin,
    E: PulseIn,
    D: DelayNs,
{
    /// Create the sensor with the trigger held LOW
    pub fn new(mut trigger: T, echo: E, delay: D, config: HcSr04Config) -> Self {
        trigger.set_low();
        Self {
            trigger,
            echo,
            delay,
            config,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &HcSr04Config {
        &self.config
    }

    /// Emit the trigger pulse
    pub fn trigger(&mut self) {
        self.trigger.set_low();
        self.delay.delay_us(self.config.settle_us);
        self.trigger.set_high();
        self.delay.delay_us(self.config.trigger_pulse_us);
        self.trigger.set_low();
    }
}

impl<T, E, D> RangeSensor for HcSr04<T, E, D>
where
    T: OutputPin,
    E: PulseIn,
    D: DelayNs,
{
    fn ping(&mut self) -> u32 {
        self.trigger();
        self.echo.pulse_in_high(self.config.echo_timeout_us)
    }
}
