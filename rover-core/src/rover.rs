//! Rover context
//!
//! [`Rover`] owns the drive train and range sensor and runs one iteration of
//! the command/sensor loop at a time. It holds the only mutable state of the
//! controller, so the loop driver decides the pacing (the firmware sleeps
//! between iterations, tests just call [`Rover::step`] again).

use rover_protocol::DistanceLine;

use crate::drive::DriveState;
use crate::ranging::{DistancePolicy, DistanceReading};
use crate::traits::{DriveTrain, RangeSensor};

/// What the command interpreter did with one byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandOutcome {
    /// The byte selected a state, which is now applied
    Applied {
        previous: DriveState,
        current: DriveState,
    },
    /// Not a command byte; nothing changed
    Ignored(u8),
}

impl CommandOutcome {
    /// Check if the drive state actually changed
    pub fn changed(&self) -> bool {
        match *self {
            CommandOutcome::Applied { previous, current } => previous != current,
            CommandOutcome::Ignored(_) => false,
        }
    }
}

/// Result of one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Iteration {
    /// Outcome for the byte consumed this iteration, if there was one
    pub command: Option<CommandOutcome>,
    /// This iteration's distance reading
    pub reading: DistanceReading,
    /// Drive state after the command was handled
    pub drive: DriveState,
}

impl Iteration {
    /// Telemetry line to emit for this iteration
    pub fn line(&self) -> DistanceLine {
        DistanceLine::new(self.reading.cm())
    }
}

/// Command interpreter and range sampler state
pub struct Rover<D, R> {
    drive: D,
    ranger: R,
    policy: DistancePolicy,
}

impl<D: DriveTrain, R: RangeSensor> Rover<D, R> {
    /// Take ownership of the hardware and force the motors to Stop
    pub fn new(mut drive: D, ranger: R, policy: DistancePolicy) -> Self {
        drive.stop();
        Self {
            drive,
            ranger,
            policy,
        }
    }

    /// Current drive state
    pub fn drive_state(&self) -> DriveState {
        self.drive.state()
    }

    /// Distance policy in use
    pub fn policy(&self) -> &DistancePolicy {
        &self.policy
    }

    /// Access the drive train
    pub fn drive(&self) -> &D {
        &self.drive
    }

    /// Access the range sensor
    pub fn ranger(&self) -> &R {
        &self.ranger
    }

    /// Interpret one command byte
    ///
    /// Recognised bytes are applied to the motor outputs before this
    /// returns, even if they repeat the current state. Anything else is
    /// ignored and leaves the outputs untouched.
    pub fn execute_command(&mut self, byte: u8) -> CommandOutcome {
        match DriveState::from_command_byte(byte) {
            Some(current) => {
                let previous = self.drive.state();
                self.drive.apply(current);
                CommandOutcome::Applied { previous, current }
            }
            None => CommandOutcome::Ignored(byte),
        }
    }

    /// Run one ranging cycle
    pub fn sample(&mut self) -> DistanceReading {
        let round_trip_us = self.ranger.ping();
        self.policy.reading(round_trip_us)
    }

    /// Run one loop iteration: the pending byte first, then a sample
    pub fn step(&mut self, pending: Option<u8>) -> Iteration {
        let command = pending.map(|byte| self.execute_command(byte));
        let reading = self.sample();
        Iteration {
            command,
            reading,
            drive: self.drive.state(),
        }
    }
}
