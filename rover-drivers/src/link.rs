//! Serial link to the companion
//!
//! Inbound: one command byte per loop iteration, polled without waiting.
//! Outbound: one `D:<cm>\n` telemetry line per iteration.

use rover_hal::{UartRx, UartTx};
use rover_protocol::DistanceLine;

/// UART pair carrying commands and telemetry
pub struct SerialLink<Rx, Tx> {
    rx: Rx,
    tx: Tx,
}

impl<Rx: UartRx, Tx: UartTx> SerialLink<Rx, Tx> {
    pub fn new(rx: Rx, tx: Tx) -> Self {
        Self { rx, tx }
    }

    /// Take the next command byte, if one has arrived
    pub fn poll_command(&mut self) -> Result<Option<u8>, Rx::Error> {
        self.rx.try_read_byte()
    }

    /// Write one telemetry line
    pub fn send_line(&mut self, line: &DistanceLine) -> Result<(), Tx::Error> {
        self.tx.write_blocking(line.render().as_bytes())?;
        self.tx.flush()
    }
}
