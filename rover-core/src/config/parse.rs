//! Minimal parser for `rover.toml`
//!
//! Handles only the subset the rover uses:
//! - `[section]` headers
//! - `key = integer` pairs (underscores allowed as digit separators)
//! - Comments (`# ...`), whole-line or trailing
//!
//! Keys that are absent keep their default values.

use core::str::FromStr;

use super::types::RoverConfig;

/// What went wrong on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseErrorKind {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not known in the current section
    UnknownKey,
    /// Value is not an integer in range
    InvalidValue,
    /// Line is neither a header nor `key = value`
    InvalidLine,
}

/// Parse error with the 1-based line it occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Serial,
    Drive,
    Ranger,
    Timing,
}

/// Parse `rover.toml` contents into a [`RoverConfig`]
///
/// The result is not validated; call [`RoverConfig::validate`] afterwards.
pub fn parse_config(input: &str) -> Result<RoverConfig, ParseError> {
    let mut config = RoverConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let at = |kind| ParseError {
            line: index + 1,
            kind,
        };

        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let header = header
                .strip_suffix(']')
                .ok_or(at(ParseErrorKind::InvalidSection))?;
            section = parse_section_header(header.trim())
                .ok_or(at(ParseErrorKind::InvalidSection))?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(at(ParseErrorKind::InvalidLine))?;
        apply_value(&mut config, section, key, value).map_err(at)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Option<Section> {
    match header {
        "serial" => Some(Section::Serial),
        "drive" => Some(Section::Drive),
        "ranger" => Some(Section::Ranger),
        "timing" => Some(Section::Timing),
        _ => None,
    }
}

/// Drop everything from the first `#`
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Split a "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse an integer value, accepting `_` separators
fn parse_int<T: FromStr>(value: &str) -> Result<T, ParseErrorKind> {
    let mut digits = heapless::String::<24>::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ParseErrorKind::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseErrorKind::InvalidValue)
}

fn apply_value(
    config: &mut RoverConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseErrorKind> {
    match (section, key) {
        (Section::Serial, "baudrate") => config.serial.baudrate = parse_int(value)?,

        (Section::Drive, "left_a") => config.drive.left_a = parse_int(value)?,
        (Section::Drive, "left_b") => config.drive.left_b = parse_int(value)?,
        (Section::Drive, "right_a") => config.drive.right_a = parse_int(value)?,
        (Section::Drive, "right_b") => config.drive.right_b = parse_int(value)?,

        (Section::Ranger, "trigger_pin") => config.ranger.trigger_pin = parse_int(value)?,
        (Section::Ranger, "echo_pin") => config.ranger.echo_pin = parse_int(value)?,
        (Section::Ranger, "settle_us") => config.ranger.settle_us = parse_int(value)?,
        (Section::Ranger, "trigger_pulse_us") => {
            config.ranger.trigger_pulse_us = parse_int(value)?
        }
        (Section::Ranger, "echo_timeout_us") => config.ranger.echo_timeout_us = parse_int(value)?,
        (Section::Ranger, "no_echo_cm") => config.ranger.no_echo_cm = parse_int(value)?,

        (Section::Timing, "loop_period_ms") => config.timing.loop_period_ms = parse_int(value)?,

        _ => return Err(ParseErrorKind::UnknownKey),
    }
    Ok(())
}
