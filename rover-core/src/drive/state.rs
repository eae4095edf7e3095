//! Drive state definition
//!
//! All motor output behavior is a pure function of the current drive state.

use rover_protocol::MotionCommand;

/// Logic levels of the four H-bridge inputs (`true` = HIGH)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorLevels {
    pub left_a: bool,
    pub left_b: bool,
    pub right_a: bool,
    pub right_b: bool,
}

impl MotorLevels {
    /// All four inputs LOW
    pub const RELEASED: MotorLevels = MotorLevels::new(false, false, false, false);

    pub const fn new(left_a: bool, left_b: bool, right_a: bool, right_b: bool) -> Self {
        Self {
            left_a,
            left_b,
            right_a,
            right_b,
        }
    }

    /// Levels in pin order: left A, left B, right A, right B
    pub const fn as_array(&self) -> [bool; 4] {
        [self.left_a, self.left_b, self.right_a, self.right_b]
    }
}

/// Intended motion of the rover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveState {
    Forward,
    Backward,
    /// Spin left in place (left wheel back, right wheel forward)
    TurnLeft,
    /// Spin right in place (left wheel forward, right wheel back)
    TurnRight,
    /// Both bridges released
    #[default]
    Stop,
}

impl DriveState {
    /// Decode a command byte into the state it selects
    ///
    /// Returns `None` for unrecognised bytes; callers keep their current
    /// state in that case.
    pub const fn from_command_byte(byte: u8) -> Option<Self> {
        match MotionCommand::from_byte(byte) {
            Some(cmd) => Some(Self::from_command(cmd)),
            None => None,
        }
    }

    pub const fn from_command(cmd: MotionCommand) -> Self {
        match cmd {
            MotionCommand::Forward => DriveState::Forward,
            MotionCommand::Backward => DriveState::Backward,
            MotionCommand::Left => DriveState::TurnLeft,
            MotionCommand::Right => DriveState::TurnRight,
            MotionCommand::Stop => DriveState::Stop,
        }
    }

    /// H-bridge input levels for this state
    pub const fn levels(self) -> MotorLevels {
        match self {
            DriveState::Forward => MotorLevels::new(true, false, true, false),
            DriveState::Backward => MotorLevels::new(false, true, false, true),
            DriveState::TurnLeft => MotorLevels::new(false, true, true, false),
            DriveState::TurnRight => MotorLevels::new(true, false, false, true),
            DriveState::Stop => MotorLevels::RELEASED,
        }
    }
}
