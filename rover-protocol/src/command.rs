//! Motion command bytes
//!
//! Each command is a single case-sensitive ASCII byte with no terminator.

/// Drive forward
pub const CMD_FORWARD: u8 = b'F';
/// Drive backward
pub const CMD_BACKWARD: u8 = b'B';
/// Spin left in place
pub const CMD_LEFT: u8 = b'L';
/// Spin right in place
pub const CMD_RIGHT: u8 = b'R';
/// Stop both motors
pub const CMD_STOP: u8 = b'S';

/// A recognised motion command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionCommand {
    Forward,
    Backward,
    Left,
    Right,
    Stop,
}

impl MotionCommand {
    /// All commands, in wire-byte order F, B, L, R, S
    pub const ALL: [MotionCommand; 5] = [
        MotionCommand::Forward,
        MotionCommand::Backward,
        MotionCommand::Left,
        MotionCommand::Right,
        MotionCommand::Stop,
    ];

    /// Decode a received byte
    ///
    /// Returns `None` for anything that is not one of the five command
    /// bytes, including lowercase letters, CR and LF.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            CMD_FORWARD => Some(MotionCommand::Forward),
            CMD_BACKWARD => Some(MotionCommand::Backward),
            CMD_LEFT => Some(MotionCommand::Left),
            CMD_RIGHT => Some(MotionCommand::Right),
            CMD_STOP => Some(MotionCommand::Stop),
            _ => None,
        }
    }

    /// Wire byte for this command
    pub const fn as_byte(self) -> u8 {
        match self {
            MotionCommand::Forward => CMD_FORWARD,
            MotionCommand::Backward => CMD_BACKWARD,
            MotionCommand::Left => CMD_LEFT,
            MotionCommand::Right => CMD_RIGHT,
            MotionCommand::Stop => CMD_STOP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_bytes() {
        assert_eq!(MotionCommand::from_byte(b'F'), Some(MotionCommand::Forward));
        assert_eq!(MotionCommand::from_byte(b'B'), Some(MotionCommand::Backward));
        assert_eq!(MotionCommand::from_byte(b'L'), Some(MotionCommand::Left));
        assert_eq!(MotionCommand::from_byte(b'R'), Some(MotionCommand::Right));
        assert_eq!(MotionCommand::from_byte(b'S'), Some(MotionCommand::Stop));
    }

    #[test]
    fn test_case_sensitive() {
        for byte in [b'f', b'b', b'l', b'r', b's'] {
            assert_eq!(MotionCommand::from_byte(byte), None);
        }
    }

    #[test]
    fn test_line_endings_ignored() {
        assert_eq!(MotionCommand::from_byte(b'\n'), None);
        assert_eq!(MotionCommand::from_byte(b'\r'), None);
        assert_eq!(MotionCommand::from_byte(0), None);
    }

    #[test]
    fn test_exactly_five_bytes_decode() {
        let decoded = (0..=u8::MAX)
            .filter(|&b| MotionCommand::from_byte(b).is_some())
            .count();
        assert_eq!(decoded, 5);

        for cmd in MotionCommand::ALL {
            assert_eq!(MotionCommand::from_byte(cmd.as_byte()), Some(cmd));
        }
    }
}
