//! Host-side command sender
//!
//! The host steering program re-evaluates its decision many times per
//! second but the rover only needs a byte when the decision changes.
//! [`CommandSender`] remembers the last command that was actually written
//! and suppresses repeats.

use crate::command::MotionCommand;

/// Suppresses consecutive duplicate commands
#[derive(Debug, Clone, Default)]
pub struct CommandSender {
    last_sent: Option<MotionCommand>,
}

impl CommandSender {
    /// Create a sender that has not sent anything yet
    pub const fn new() -> Self {
        Self { last_sent: None }
    }

    /// Byte to transmit for `cmd`, or `None` if it repeats the last one
    ///
    /// The command is only recorded once the caller confirms the write with
    /// [`CommandSender::mark_sent`], so a failed write is retried on the
    /// next call.
    pub fn pending(&self, cmd: MotionCommand) -> Option<u8> {
        if self.last_sent == Some(cmd) {
            None
        } else {
            Some(cmd.as_byte())
        }
    }

    /// Record that `cmd` reached the link
    pub fn mark_sent(&mut self, cmd: MotionCommand) {
        self.last_sent = Some(cmd);
    }

    /// Write `cmd` through `write` unless it repeats the last command
    ///
    /// Returns `Ok(true)` if a byte was written.
    pub fn send<E>(
        &mut self,
        cmd: MotionCommand,
        write: impl FnOnce(u8) -> Result<(), E>,
    ) -> Result<bool, E> {
        match self.pending(cmd) {
            Some(byte) => {
                write(byte)?;
                self.mark_sent(cmd);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Last command known to have been written
    pub fn last_sent(&self) -> Option<MotionCommand> {
        self.last_sent
    }

    /// Forget the last command so the next one is always sent
    ///
    /// Use after reconnecting, since the rover may have rebooted into Stop.
    pub fn reset(&mut self) {
        self.last_sent = None;
    }
}
