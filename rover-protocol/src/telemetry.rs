//! Distance telemetry lines
//!
//! The rover emits one line per control loop iteration:
//!
//! ```text
//! D:<centimeters>\n
//! ```
//!
//! `<centimeters>` is an unsigned decimal integer without padding. The rover
//! terminates lines with a bare LF; the parser also accepts CRLF so it can
//! read logs captured from terminals that translate line endings.

use core::fmt::Write as _;

use heapless::{String, Vec};

/// Line prefix for distance readings
pub const DISTANCE_PREFIX: &[u8] = b"D:";

/// Maximum accepted line length, terminator excluded
pub const MAX_LINE_LEN: usize = 16;

/// Errors reported while parsing telemetry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelemetryError {
    /// Line exceeded [`MAX_LINE_LEN`] before its terminator
    LineTooLong,
    /// `D:` line whose value is not a decimal integer in range
    InvalidValue,
}

/// A single distance report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DistanceLine {
    /// Reported distance in centimeters
    pub cm: u16,
}

impl DistanceLine {
    pub const fn new(cm: u16) -> Self {
        Self { cm }
    }

    /// Render the line including its LF terminator
    pub fn render(&self) -> String<MAX_LINE_LEN> {
        let mut line = String::new();
        // "D:65535\n" is 8 bytes, well inside MAX_LINE_LEN
        let _ = write!(line, "D:{}\n", self.cm);
        line
    }
}

/// Parse the value part of a `D:` line
fn parse_distance(digits: &[u8]) -> Result<u16, TelemetryError> {
    if digits.is_empty() {
        return Err(TelemetryError::InvalidValue);
    }

    let mut value: u32 = 0;
    for &byte in digits {
        if !byte.is_ascii_digit() {
            return Err(TelemetryError::InvalidValue);
        }
        value = value * 10 + (byte - b'0') as u32;
        if value > u16::MAX as u32 {
            return Err(TelemetryError::InvalidValue);
        }
    }
    Ok(value as u16)
}

/// Reassembles telemetry lines from a byte stream
///
/// Lines that do not start with `D:` are skipped silently, so the parser can
/// sit on a link that also carries boot banners or debug text.
#[derive(Debug, Clone)]
pub struct TelemetryParser {
    buffer: Vec<u8, MAX_LINE_LEN>,
    overflowed: bool,
}

impl Default for TelemetryParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryParser {
    /// Create a new telemetry parser
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(cm))` when a complete distance line is parsed,
    /// `Ok(None)` when more bytes are needed or a non-distance line ended,
    /// or `Err` for a malformed distance line. The parser is ready for the
    /// next line after every error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<u16>, TelemetryError> {
        if byte != b'\n' {
            if !self.overflowed && self.buffer.push(byte).is_err() {
                self.overflowed = true;
            }
            return Ok(None);
        }

        if self.overflowed {
            // The buffer still holds the start of the line
            let is_distance = self.buffer.starts_with(DISTANCE_PREFIX);
            self.reset();
            return if is_distance {
                Err(TelemetryError::LineTooLong)
            } else {
                Ok(None)
            };
        }

        let mut line = self.buffer.as_slice();
        if let Some((&b'\r', rest)) = line.split_last() {
            line = rest;
        }

        let result = match line.strip_prefix(DISTANCE_PREFIX) {
            Some(digits) => parse_distance(digits).map(Some),
            None => Ok(None),
        };

        self.reset();
        result
    }

    /// Feed bytes until the first line completes
    ///
    /// Returns how many bytes were consumed together with the outcome of
    /// the line that ended there (`Ok(None)` if no distance line completed).
    /// Call again with the rest of the slice to continue; nothing is lost
    /// when a read holds several lines.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> (usize, Result<Option<u16>, TelemetryError>) {
        for (i, &byte) in bytes.iter().enumerate() {
            match self.feed(byte) {
                Ok(None) => {}
                outcome => return (i + 1, outcome),
            }
        }
        (bytes.len(), Ok(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Feed a whole slice and return the outcome of the first line in it
    fn first(parser: &mut TelemetryParser, bytes: &[u8]) -> Result<Option<u16>, TelemetryError> {
        parser.feed_bytes(bytes).1
    }

    #[test]
    fn test_render_line() {
        assert_eq!(DistanceLine::new(17).render().as_str(), "D:17\n");
        assert_eq!(DistanceLine::new(100).render().as_str(), "D:100\n");
        assert_eq!(DistanceLine::new(0).render().as_str(), "D:0\n");
        assert_eq!(DistanceLine::new(u16::MAX).render().as_str(), "D:65535\n");
    }

    #[test]
    fn test_parse_lf_and_crlf() {
        let mut parser = TelemetryParser::new();
        assert_eq!(first(&mut parser, b"D:42\n"), Ok(Some(42)));
        assert_eq!(first(&mut parser, b"D:510\r\n"), Ok(Some(510)));
    }

    #[test]
    fn test_parse_skips_other_lines() {
        let mut parser = TelemetryParser::new();
        assert_eq!(first(&mut parser, b"booting\n"), Ok(None));
        assert_eq!(first(&mut parser, b"\n"), Ok(None));
        assert_eq!(first(&mut parser, b"D:9\n"), Ok(Some(9)));
    }

    #[test]
    fn test_long_banner_is_skipped() {
        let mut parser = TelemetryParser::new();
        let banner = b"Rover firmware starting...\n";

        assert_eq!(parser.feed_bytes(banner), (banner.len(), Ok(None)));
        assert_eq!(first(&mut parser, b"D:8\n"), Ok(Some(8)));
    }

    #[test]
    fn test_parse_invalid_value() {
        let mut parser = TelemetryParser::new();
        assert_eq!(first(&mut parser, b"D:\n"), Err(TelemetryError::InvalidValue));
        assert_eq!(first(&mut parser, b"D:-3\n"), Err(TelemetryError::InvalidValue));
        assert_eq!(first(&mut parser, b"D:70000\n"), Err(TelemetryError::InvalidValue));

        // Recovers on the next line
        assert_eq!(first(&mut parser, b"D:12\n"), Ok(Some(12)));
    }

    #[test]
    fn test_parse_line_too_long_resyncs() {
        let mut parser = TelemetryParser::new();
        let result = first(&mut parser, b"D:1234567890123456789\n");
        assert_eq!(result, Err(TelemetryError::LineTooLong));

        assert_eq!(first(&mut parser, b"D:33\n"), Ok(Some(33)));
    }

    #[test]
    fn test_feed_bytes_reports_consumed() {
        let mut parser = TelemetryParser::new();
        let data = b"D:1\nD:2\n";

        let (used, first_line) = parser.feed_bytes(data);
        assert_eq!((used, first_line), (4, Ok(Some(1))));

        let (used, second_line) = parser.feed_bytes(&data[used..]);
        assert_eq!((used, second_line), (4, Ok(Some(2))));
    }

    #[test]
    fn test_feed_bytes_drains_a_whole_read() {
        let mut parser = TelemetryParser::new();
        let mut rest: &[u8] = b"hello\nD:5\nD:x\nD:6\nD:7";
        let mut seen: heapless::Vec<Result<u16, TelemetryError>, 8> = heapless::Vec::new();

        while !rest.is_empty() {
            let (used, outcome) = parser.feed_bytes(rest);
            match outcome {
                Ok(Some(cm)) => seen.push(Ok(cm)).unwrap(),
                Err(e) => seen.push(Err(e)).unwrap(),
                Ok(None) => {}
            }
            rest = &rest[used..];
        }

        assert_eq!(
            seen.as_slice(),
            &[Ok(5), Err(TelemetryError::InvalidValue), Ok(6)]
        );
        // "D:7" stays buffered until its newline arrives
        assert_eq!(parser.feed(b'\n'), Ok(Some(7)));
    }

    proptest! {
        #[test]
        fn prop_rendered_lines_parse_back(cm in any::<u16>()) {
            let line = DistanceLine::new(cm).render();
            let mut parser = TelemetryParser::new();
            prop_assert_eq!(first(&mut parser, line.as_bytes()), Ok(Some(cm)));
        }

        #[test]
        fn prop_parser_recovers_from_noise(noise in proptest::collection::vec(any::<u8>(), 0..64)) {
            let mut parser = TelemetryParser::new();
            for byte in noise {
                let _ = parser.feed(byte);
            }
            // A newline always ends whatever the noise left behind
            let _ = parser.feed(b'\n');
            prop_assert_eq!(first(&mut parser, b"D:77\n"), Ok(Some(77)));
        }

        #[test]
        fn prop_non_distance_lines_never_error(
            text in proptest::collection::vec(b'a'..=b'z', 0..48)
        ) {
            let mut parser = TelemetryParser::new();
            for byte in text {
                prop_assert_eq!(parser.feed(byte), Ok(None));
            }
            prop_assert_eq!(parser.feed(b'\n'), Ok(None));
        }
    }
}
