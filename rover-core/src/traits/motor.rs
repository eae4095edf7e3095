//! Drive train trait
//!
//! A drive train turns a [`DriveState`] into motor outputs. The rover has no
//! speed control, so applying a state is a single, immediate operation.

use crate::drive::{DriveState, MotorLevels};

/// Trait for the two-wheel differential drive
pub trait DriveTrain {
    /// Drive all motor outputs to the pattern for `state`
    ///
    /// Implementations must update every output before returning, so no
    /// caller ever observes a half-applied state.
    fn apply(&mut self, state: DriveState);

    /// Get the state last applied
    fn state(&self) -> DriveState;

    /// Levels currently asserted on the motor outputs
    fn levels(&self) -> MotorLevels {
        self.state().levels()
    }

    /// Release both motors
    fn stop(&mut self) {
        self.apply(DriveState::Stop);
    }
}
