//! Dual H-bridge drive train
//!
//! Two DC motors, each on an H-bridge with two direction inputs (L298N,
//! L9110S and friends). No enable or PWM line: a motor is either at full
//! power in one direction or released.

use rover_core::drive::{DriveState, MotorLevels};
use rover_core::traits::DriveTrain;
use rover_hal::{Level, OutputPin};

/// Four-pin differential drive
pub struct HBridgePair<LA, LB, RA, RB> {
    left_a: LA,
    left_b: LB,
    right_a: RA,
    right_b: RB,
    state: DriveState,
}

impl<LA, LB, RA, RB> HBridgePair<LA, LB, RA, RB>
where
    LA: OutputPin,
    LB: OutputPin,
    RA: OutputPin,
    RB: OutputPin,
{
    /// Create the drive train and release both motors
    pub fn new(left_a: LA, left_b: LB, right_a: RA, right_b: RB) -> Self {
        let mut drive = Self {
            left_a,
            left_b,
            right_a,
            right_b,
            state: DriveState::Stop,
        };
        drive.write(MotorLevels::RELEASED);
        drive
    }

    /// Levels actually read back from the output latches
    pub fn pin_levels(&self) -> MotorLevels {
        MotorLevels::new(
            self.left_a.is_set_high(),
            self.left_b.is_set_high(),
            self.right_a.is_set_high(),
            self.right_b.is_set_high(),
        )
    }

    fn write(&mut self, levels: MotorLevels) {
        self.left_a.set_level(Level::from(levels.left_a));
        self.left_b.set_level(Level::from(levels.left_b));
        self.right_a.set_level(Level::from(levels.right_a));
        self.right_b.set_level(Level::from(levels.right_b));
    }
}

impl<LA, LB, RA, RB> DriveTrain for HBridgePair<LA, LB, RA, RB>
where
    LA: OutputPin,
    LB: OutputPin,
    RA: OutputPin,
    RB: OutputPin,
{
    fn apply(&mut self, state: DriveState) {
        self.write(state.levels());
        self.state = state;
    }

    fn state(&self) -> DriveState {
        self.state
    }

    fn levels(&self) -> MotorLevels {
        self.pin_levels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// Pin that counts writes so tests can see every line was driven
    struct MockPin<'a> {
        high: bool,
        writes: &'a Cell<u32>,
    }

    impl<'a> MockPin<'a> {
        fn new(initial: bool, writes: &'a Cell<u32>) -> Self {
            Self {
                high: initial,
                writes,
            }
        }
    }

    impl OutputPin for MockPin<'_> {
        fn set_high(&mut self) {
            self.high = true;
            self.writes.set(self.writes.get() + 1);
        }

        fn set_low(&mut self) {
            self.high = false;
            self.writes.set(self.writes.get() + 1);
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    type MockBridge<'a> = HBridgePair<MockPin<'a>, MockPin<'a>, MockPin<'a>, MockPin<'a>>;

    fn bridge(writes: &Cell<u32>) -> MockBridge<'_> {
        // Pins start high to prove construction releases them
        HBridgePair::new(
            MockPin::new(true, writes),
            MockPin::new(true, writes),
            MockPin::new(true, writes),
            MockPin::new(true, writes),
        )
    }

    #[test]
    fn test_new_releases_motors() {
        let writes = Cell::new(0);
        let drive = bridge(&writes);

        assert_eq!(drive.state(), DriveState::Stop);
        assert_eq!(drive.pin_levels(), MotorLevels::RELEASED);
        assert_eq!(writes.get(), 4);
    }

    #[test]
    fn test_forward() {
        let writes = Cell::new(0);
        let mut drive = bridge(&writes);

        drive.apply(DriveState::Forward);

        assert_eq!(drive.state(), DriveState::Forward);
        assert_eq!(drive.levels(), MotorLevels::new(true, false, true, false));
    }

    #[test]
    fn test_turns_counter_rotate() {
        let writes = Cell::new(0);
        let mut drive = bridge(&writes);

        drive.apply(DriveState::TurnLeft);
        assert_eq!(drive.levels(), MotorLevels::new(false, true, true, false));

        drive.apply(DriveState::TurnRight);
        assert_eq!(drive.levels(), MotorLevels::new(true, false, false, true));
    }

    #[test]
    fn test_every_apply_writes_all_pins() {
        let writes = Cell::new(0);
        let mut drive = bridge(&writes);
        writes.set(0);

        drive.apply(DriveState::Backward);
        assert_eq!(writes.get(), 4);

        // Re-applying the same state still refreshes every line
        drive.apply(DriveState::Backward);
        assert_eq!(writes.get(), 8);
        assert_eq!(drive.levels(), MotorLevels::new(false, true, false, true));
    }

    #[test]
    fn test_pin_levels_match_table() {
        let writes = Cell::new(0);
        let mut drive = bridge(&writes);

        for state in [
            DriveState::Forward,
            DriveState::Backward,
            DriveState::TurnLeft,
            DriveState::TurnRight,
            DriveState::Stop,
        ] {
            drive.apply(state);
            assert_eq!(drive.pin_levels(), state.levels());
        }
    }

    #[test]
    fn test_stop() {
        let writes = Cell::new(0);
        let mut drive = bridge(&writes);

        drive.apply(DriveState::Forward);
        drive.stop();

        assert_eq!(drive.state(), DriveState::Stop);
        assert_eq!(drive.pin_levels(), MotorLevels::RELEASED);
    }
}
