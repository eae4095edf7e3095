//! Configuration types
//!
//! Defaults reproduce the reference wiring: trigger on GPIO3, echo on
//! GPIO5, left bridge on GPIO11/12, right bridge on GPIO10/9, 9600 baud,
//! 30 ms echo timeout and a 50 ms loop period.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use core::ops::RangeInclusive;

use crate::ranging::{DistancePolicy, DEFAULT_NO_ECHO_CM};

/// Shortest trigger pulse the HC-SR04 reliably responds to
pub const MIN_TRIGGER_PULSE_US: u32 = 10;

/// Number of GPIO pins the rover claims (4 motor + trigger + echo)
pub const PIN_COUNT: usize = 6;

/// Errors found when validating a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The same GPIO is assigned to two functions
    DuplicatePin(u8),
    /// Echo timeout of zero would never measure anything
    ZeroEchoTimeout,
    /// Trigger pulse shorter than [`MIN_TRIGGER_PULSE_US`]
    TriggerPulseTooShort,
    /// Baud rate of zero
    ZeroBaudrate,
    /// GPIO the board cannot hand out
    PinUnavailable(u8),
}

/// Serial link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self { baudrate: 9600 }
    }
}

/// H-bridge input pins (GPIO numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DrivePins {
    pub left_a: u8,
    pub left_b: u8,
    pub right_a: u8,
    pub right_b: u8,
}

impl Default for DrivePins {
    fn default() -> Self {
        Self {
            left_a: 11,
            left_b: 12,
            right_a: 10,
            right_b: 9,
        }
    }
}

/// Ultrasonic ranger wiring and timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct RangerConfig {
    /// Trigger output pin
    pub trigger_pin: u8,
    /// Echo input pin
    pub echo_pin: u8,
    /// LOW time before the trigger pulse (µs)
    pub settle_us: u32,
    /// Trigger pulse HIGH time (µs)
    pub trigger_pulse_us: u32,
    /// Longest wait for a complete echo pulse (µs)
    pub echo_timeout_us: u32,
    /// Distance reported when the echo times out (cm)
    pub no_echo_cm: u16,
}

impl Default for RangerConfig {
    fn default() -> Self {
        Self {
            trigger_pin: 3,
            echo_pin: 5,
            settle_us: 2,
            trigger_pulse_us: MIN_TRIGGER_PULSE_US,
            echo_timeout_us: 30_000,
            no_echo_cm: DEFAULT_NO_ECHO_CM,
        }
    }
}

impl RangerConfig {
    /// Distance policy for these settings
    pub const fn distance_policy(&self) -> DistancePolicy {
        DistancePolicy::new(self.no_echo_cm)
    }
}

/// Loop pacing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct TimingConfig {
    /// Pause at the end of every iteration (ms)
    pub loop_period_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { loop_period_ms: 50 }
    }
}

/// Complete rover configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct RoverConfig {
    pub serial: SerialConfig,
    pub drive: DrivePins,
    pub ranger: RangerConfig,
    pub timing: TimingConfig,
}

impl RoverConfig {
    /// Every GPIO the rover claims, in the order they are set up
    pub const fn pins(&self) -> [u8; PIN_COUNT] {
        [
            self.drive.left_a,
            self.drive.left_b,
            self.drive.right_a,
            self.drive.right_b,
            self.ranger.trigger_pin,
            self.ranger.echo_pin,
        ]
    }

    /// Check the configuration for values the hardware cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pins = self.pins();
        for (i, pin) in pins.iter().enumerate() {
            if pins[i + 1..].contains(pin) {
                return Err(ConfigError::DuplicatePin(*pin));
            }
        }

        if self.ranger.echo_timeout_us == 0 {
            return Err(ConfigError::ZeroEchoTimeout);
        }
        if self.ranger.trigger_pulse_us < MIN_TRIGGER_PULSE_US {
            return Err(ConfigError::TriggerPulseTooShort);
        }
        if self.serial.baudrate == 0 {
            return Err(ConfigError::ZeroBaudrate);
        }

        Ok(())
    }

    /// Check that every claimed GPIO lies in the board's usable range
    pub fn validate_pins(&self, usable: RangeInclusive<u8>) -> Result<(), ConfigError> {
        match self.pins().into_iter().find(|pin| !usable.contains(pin)) {
            Some(pin) => Err(ConfigError::PinUnavailable(pin)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_wiring() {
        let config = RoverConfig::default();

        assert_eq!(config.serial.baudrate, 9600);
        assert_eq!(config.pins(), [11, 12, 10, 9, 3, 5]);
        assert_eq!(config.ranger.settle_us, 2);
        assert_eq!(config.ranger.trigger_pulse_us, 10);
        assert_eq!(config.ranger.echo_timeout_us, 30_000);
        assert_eq!(config.ranger.no_echo_cm, 100);
        assert_eq!(config.timing.loop_period_ms, 50);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_duplicate_pin_rejected() {
        let mut config = RoverConfig::default();
        config.ranger.echo_pin = config.drive.left_b;

        assert_eq!(config.validate(), Err(ConfigError::DuplicatePin(12)));
    }

    #[test]
    fn test_timing_limits() {
        let mut config = RoverConfig::default();
        config.ranger.echo_timeout_us = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroEchoTimeout));

        let mut config = RoverConfig::default();
        config.ranger.trigger_pulse_us = 5;
        assert_eq!(config.validate(), Err(ConfigError::TriggerPulseTooShort));

        let mut config = RoverConfig::default();
        config.serial.baudrate = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroBaudrate));
    }

    #[test]
    fn test_distance_policy_follows_config() {
        let mut config = RangerConfig::default();
        config.no_echo_cm = 250;
        assert_eq!(config.distance_policy().no_echo_cm, 250);
    }

    #[test]
    fn test_pins_outside_board_range() {
        let config = RoverConfig::default();
        assert_eq!(config.validate_pins(2..=29), Ok(()));
        assert_eq!(config.validate_pins(4..=29), Err(ConfigError::PinUnavailable(3)));

        let mut config = RoverConfig::default();
        config.drive.right_b = 1;
        assert_eq!(config.validate_pins(2..=29), Err(ConfigError::PinUnavailable(1)));

        let mut config = RoverConfig::default();
        config.ranger.echo_pin = 30;
        assert_eq!(config.validate_pins(2..=29), Err(ConfigError::PinUnavailable(30)));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use crate::config::parse_config;

    #[test]
    fn test_toml_matches_line_parser() {
        let text = "[drive]\nleft_a = 14\n\n[ranger]\necho_timeout_us = 25_000\nno_echo_cm = 400\n";

        let typed: RoverConfig = toml::from_str(text).unwrap();
        assert_eq!(Ok(typed), parse_config(text));
        assert_eq!(typed.drive.left_b, 12);
    }

    #[test]
    fn test_serialized_config_parses_back() {
        let mut config = RoverConfig::default();
        config.serial.baudrate = 115_200;
        config.timing.loop_period_ms = 20;

        let text = toml::to_string(&config).unwrap();
        assert_eq!(parse_config(&text), Ok(config));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(toml::from_str::<RoverConfig>("[lights]\non = 1\n").is_err());
        assert!(toml::from_str::<RoverConfig>("[drive]\necho_pin = 5\n").is_err());
        assert!(toml::from_str::<RoverConfig>("[drive]\nleft_a = 300\n").is_err());
    }
}
