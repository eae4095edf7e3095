//! Buffered UART adapters
//!
//! The interrupt-driven buffered UART fills a ring buffer in the background;
//! these adapters give the control loop a non-blocking byte poll on the
//! receive side and a blocking write on the transmit side.

use embassy_rp::uart::{self, BufferedUartRx, BufferedUartTx, DataBits, Parity, StopBits};
use embedded_io::{Read, ReadReady, Write};
use rover_hal::{uart as hal_uart, UartConfig, UartRx, UartTx};

/// UART line error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartBusError {
    /// Receive FIFO overflowed
    Overrun,
    /// Line held low for longer than a frame
    Break,
    Parity,
    Framing,
    Other,
}

impl From<uart::Error> for UartBusError {
    fn from(e: uart::Error) -> Self {
        match e {
            uart::Error::Overrun => Self::Overrun,
            uart::Error::Break => Self::Break,
            uart::Error::Parity => Self::Parity,
            uart::Error::Framing => Self::Framing,
            _ => Self::Other,
        }
    }
}

/// Convert a board-agnostic UART configuration for embassy-rp
pub fn to_embassy_config(config: &UartConfig) -> uart::Config {
    let mut out = uart::Config::default();
    out.baudrate = config.baudrate;
    out.data_bits = match config.data_bits {
        hal_uart::DataBits::Seven => DataBits::DataBits7,
        hal_uart::DataBits::Eight => DataBits::DataBits8,
    };
    out.parity = match config.parity {
        hal_uart::Parity::None => Parity::ParityNone,
        hal_uart::Parity::Even => Parity::ParityEven,
        hal_uart::Parity::Odd => Parity::ParityOdd,
    };
    out.stop_bits = match config.stop_bits {
        hal_uart::StopBits::One => StopBits::STOP1,
        hal_uart::StopBits::Two => StopBits::STOP2,
    };
    out
}

/// Receive half
pub struct RpUartRx(BufferedUartRx);

impl RpUartRx {
    pub fn new(rx: BufferedUartRx) -> Self {
        Self(rx)
    }
}

impl UartRx for RpUartRx {
    type Error = UartBusError;

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !ReadReady::read_ready(&mut self.0)? {
            return Ok(None);
        }
        let mut byte = [0u8; 1];
        let n = Read::read(&mut self.0, &mut byte)?;
        Ok((n == 1).then_some(byte[0]))
    }
}

/// Transmit half
pub struct RpUartTx(BufferedUartTx);

impl RpUartTx {
    pub fn new(tx: BufferedUartTx) -> Self {
        Self(tx)
    }
}

impl UartTx for RpUartTx {
    type Error = UartBusError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        Write::write_all(&mut self.0, data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Write::flush(&mut self.0)?;
        Ok(())
    }
}
