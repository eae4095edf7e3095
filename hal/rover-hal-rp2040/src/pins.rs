//! Dynamic pin allocation for config-driven hardware setup
//!
//! Motor and ranger pins are chosen in `rover.toml`, so they are taken from
//! the bank by number at boot. GPIO0/1 carry UART0 and are handed out
//! separately as typed pins.

use core::ops::RangeInclusive;

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::*;
use embassy_rp::{Peri, Peripherals};

/// Number of GPIO pins on RP2040
pub const GPIO_COUNT: u8 = 30;

/// Pins held back for the UART0 link (TX, RX)
pub const UART_PINS: [u8; 2] = [0, 1];

/// First pin managed by the bank
const FIRST_BANK_PIN: u8 = 2;

/// GPIO numbers the bank can hand out
pub const BANK_PINS: RangeInclusive<u8> = FIRST_BANK_PIN..=GPIO_COUNT - 1;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin(u8),
    /// Pin already taken
    AlreadyTaken(u8),
    /// Pin reserved for the serial link
    Reserved(u8),
}

/// Map a GPIO number to its slot in the bank
fn slot(pin_num: u8) -> Result<usize, PinError> {
    if pin_num >= GPIO_COUNT {
        return Err(PinError::InvalidPin(pin_num));
    }
    if UART_PINS.contains(&pin_num) {
        return Err(PinError::Reserved(pin_num));
    }
    Ok((pin_num - FIRST_BANK_PIN) as usize)
}

/// Pin bank that holds the free GPIO pins and allows taking them by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; (GPIO_COUNT - FIRST_BANK_PIN) as usize],
}

impl PinBank {
    /// Create a new pin bank
    pub fn new(p: PinBankPeripherals) -> Self {
        Self {
            pins: [
                Some(p.pin2.into()),
                Some(p.pin3.into()),
                Some(p.pin4.into()),
                Some(p.pin5.into()),
                Some(p.pin6.into()),
                Some(p.pin7.into()),
                Some(p.pin8.into()),
                Some(p.pin9.into()),
                Some(p.pin10.into()),
                Some(p.pin11.into()),
                Some(p.pin12.into()),
                Some(p.pin13.into()),
                Some(p.pin14.into()),
                Some(p.pin15.into()),
                Some(p.pin16.into()),
                Some(p.pin17.into()),
                Some(p.pin18.into()),
                Some(p.pin19.into()),
                Some(p.pin20.into()),
                Some(p.pin21.into()),
                Some(p.pin22.into()),
                Some(p.pin23.into()),
                Some(p.pin24.into()),
                Some(p.pin25.into()),
                Some(p.pin26.into()),
                Some(p.pin27.into()),
                Some(p.pin28.into()),
                Some(p.pin29.into()),
            ],
        }
    }

    /// Take a pin by number
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        self.pins[slot(pin_num)?]
            .take()
            .ok_or(PinError::AlreadyTaken(pin_num))
    }
}

/// GPIO pins that will be moved into the PinBank
pub struct PinBankPeripherals {
    pub pin2: Peri<'static, PIN_2>,
    pub pin3: Peri<'static, PIN_3>,
    pub pin4: Peri<'static, PIN_4>,
    pub pin5: Peri<'static, PIN_5>,
    pub pin6: Peri<'static, PIN_6>,
    pub pin7: Peri<'static, PIN_7>,
    pub pin8: Peri<'static, PIN_8>,
    pub pin9: Peri<'static, PIN_9>,
    pub pin10: Peri<'static, PIN_10>,
    pub pin11: Peri<'static, PIN_11>,
    pub pin12: Peri<'static, PIN_12>,
    pub pin13: Peri<'static, PIN_13>,
    pub pin14: Peri<'static, PIN_14>,
    pub pin15: Peri<'static, PIN_15>,
    pub pin16: Peri<'static, PIN_16>,
    pub pin17: Peri<'static, PIN_17>,
    pub pin18: Peri<'static, PIN_18>,
    pub pin19: Peri<'static, PIN_19>,
    pub pin20: Peri<'static, PIN_20>,
    pub pin21: Peri<'static, PIN_21>,
    pub pin22: Peri<'static, PIN_22>,
    pub pin23: Peri<'static, PIN_23>,
    pub pin24: Peri<'static, PIN_24>,
    pub pin25: Peri<'static, PIN_25>,
    pub pin26: Peri<'static, PIN_26>,
    pub pin27: Peri<'static, PIN_27>,
    pub pin28: Peri<'static, PIN_28>,
    pub pin29: Peri<'static, PIN_29>,
}

impl PinBankPeripherals {
    /// Split Embassy Peripherals into bank pins and everything else
    pub fn from_peripherals(p: Peripherals) -> (Self, RemainingPeripherals) {
        let pins = Self {
            pin2: p.PIN_2,
            pin3: p.PIN_3,
            pin4: p.PIN_4,
            pin5: p.PIN_5,
            pin6: p.PIN_6,
            pin7: p.PIN_7,
            pin8: p.PIN_8,
            pin9: p.PIN_9,
            pin10: p.PIN_10,
            pin11: p.PIN_11,
            pin12: p.PIN_12,
            pin13: p.PIN_13,
            pin14: p.PIN_14,
            pin15: p.PIN_15,
            pin16: p.PIN_16,
            pin17: p.PIN_17,
            pin18: p.PIN_18,
            pin19: p.PIN_19,
            pin20: p.PIN_20,
            pin21: p.PIN_21,
            pin22: p.PIN_22,
            pin23: p.PIN_23,
            pin24: p.PIN_24,
            pin25: p.PIN_25,
            pin26: p.PIN_26,
            pin27: p.PIN_27,
            pin28: p.PIN_28,
            pin29: p.PIN_29,
        };
        let remaining = RemainingPeripherals {
            uart0: p.UART0,
            uart_tx: p.PIN_0,
            uart_rx: p.PIN_1,
        };
        (pins, remaining)
    }
}

/// Non-bank peripherals the firmware uses
pub struct RemainingPeripherals {
    pub uart0: Peri<'static, UART0>,
    pub uart_tx: Peri<'static, PIN_0>,
    pub uart_rx: Peri<'static, PIN_1>,
}
