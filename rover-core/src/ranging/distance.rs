//! Echo duration to distance conversion
//!
//! Sound travels about 0.034 cm/µs and the echo covers the distance twice,
//! so `cm = round_trip_us * 0.034 / 2`, truncated. The conversion is done in
//! integer arithmetic as `round_trip_us * 17 / 1000`, which is exact.
//!
//! # No-echo sentinel
//!
//! A zero duration means the sensor never answered within its timeout.
//! That is reported as [`DistancePolicy::no_echo_cm`] (100 cm by default),
//! which is indistinguishable on the wire from a real 100 cm echo. Consumers
//! treating `D:100` as a literal measurement should lower the fallback or
//! check [`DistanceReading::is_echo`] on the rover side.

/// Distance reported when no echo arrives
pub const DEFAULT_NO_ECHO_CM: u16 = 100;

/// Speed of sound, halved for the round trip, in cm per 1000 µs
const HALF_SOUND_CM_PER_MS: u32 = 17;

/// Convert a non-zero echo round trip to whole centimeters
///
/// Saturates at `u16::MAX` for durations far beyond any sensor timeout.
pub const fn round_trip_to_cm(round_trip_us: u32) -> u16 {
    let cm = (round_trip_us as u64 * HALF_SOUND_CM_PER_MS as u64) / 1000;
    if cm > u16::MAX as u64 {
        u16::MAX
    } else {
        cm as u16
    }
}

/// Result of one ranging cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DistanceReading {
    /// An echo was timed
    Echo { round_trip_us: u32, cm: u16 },
    /// No echo within the timeout; reported as the fallback distance
    NoEcho { fallback_cm: u16 },
}

impl DistanceReading {
    /// Distance to report, in centimeters
    pub const fn cm(&self) -> u16 {
        match *self {
            DistanceReading::Echo { cm, .. } => cm,
            DistanceReading::NoEcho { fallback_cm } => fallback_cm,
        }
    }

    /// Check if this reading came from a real echo
    pub const fn is_echo(&self) -> bool {
        matches!(self, DistanceReading::Echo { .. })
    }
}

/// How echo durations become reported distances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DistancePolicy {
    /// Distance reported when the echo times out
    pub no_echo_cm: u16,
}

impl Default for DistancePolicy {
    fn default() -> Self {
        Self {
            no_echo_cm: DEFAULT_NO_ECHO_CM,
        }
    }
}

impl DistancePolicy {
    pub const fn new(no_echo_cm: u16) -> Self {
        Self { no_echo_cm }
    }

    /// Interpret a measured round-trip duration
    ///
    /// `0` is the pulse timer's "no echo" value and maps to
    /// [`DistanceReading::NoEcho`].
    pub const fn reading(&self, round_trip_us: u32) -> DistanceReading {
        if round_trip_us == 0 {
            DistanceReading::NoEcho {
                fallback_cm: self.no_echo_cm,
            }
        } else {
            DistanceReading::Echo {
                round_trip_us,
                cm: round_trip_to_cm(round_trip_us),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_is_fallback() {
        let policy = DistancePolicy::default();
        let reading = policy.reading(0);

        assert_eq!(reading, DistanceReading::NoEcho { fallback_cm: 100 });
        assert_eq!(reading.cm(), 100);
        assert!(!reading.is_echo());
    }

    #[test]
    fn test_one_millisecond_is_17_cm() {
        let reading = DistancePolicy::default().reading(1000);
        assert_eq!(
            reading,
            DistanceReading::Echo {
                round_trip_us: 1000,
                cm: 17
            }
        );
    }

    #[test]
    fn test_truncates() {
        // 58 µs * 0.017 = 0.986 cm
        assert_eq!(round_trip_to_cm(58), 0);
        // 59 µs * 0.017 = 1.003 cm
        assert_eq!(round_trip_to_cm(59), 1);
        // 1176 µs * 0.017 = 19.992 cm
        assert_eq!(round_trip_to_cm(1176), 19);
    }

    #[test]
    fn test_timeout_boundary() {
        // A full-length pulse would read 510 cm, but the pulse timer
        // returns 0 when it runs out, which reads as the fallback
        assert_eq!(round_trip_to_cm(30_000), 510);
        assert_eq!(DistancePolicy::default().reading(0).cm(), 100);
    }

    #[test]
    fn test_custom_fallback() {
        let policy = DistancePolicy::new(400);
        assert_eq!(policy.reading(0).cm(), 400);
        assert_eq!(policy.reading(1000).cm(), 17);
    }

    #[test]
    fn test_saturates() {
        assert_eq!(round_trip_to_cm(u32::MAX), u16::MAX);
    }

    proptest! {
        #[test]
        fn prop_matches_float_formula(us in 1u32..=30_000) {
            let expected = (us as f64 * 0.034 / 2.0) as u16;
            prop_assert_eq!(round_trip_to_cm(us), expected);
        }

        #[test]
        fn prop_monotonic(a in 1u32..=100_000, b in 1u32..=100_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(round_trip_to_cm(lo) <= round_trip_to_cm(hi));
        }
    }
}
