//! Rover - two-wheeled robot firmware
//!
//! Main firmware binary for RP2040-based rover boards. Drives two DC motors
//! through a dual H-bridge on single-byte serial commands and reports the
//! ultrasonic range to the companion once per loop.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use embassy_time::{Delay, Duration};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use rover_core::config::{parse_config, RoverConfig};
use rover_core::Rover;
use rover_drivers::link::SerialLink;
use rover_drivers::motor::HBridgePair;
use rover_drivers::ranger::{HcSr04, HcSr04Config};
use rover_hal::UartConfig;
use rover_hal_rp2040::uart::to_embassy_config;
use rover_hal_rp2040::{
    EchoPin, PinBank, PinBankPeripherals, PinError, RpOutput, RpUartRx, RpUartTx, BANK_PINS,
};

mod tasks;

use tasks::{RoverDrive, RoverRanger};

/// Embedded configuration (compiled into firmware)
/// Edit rover.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../rover.toml");

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Rover firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let (pins, remaining) = PinBankPeripherals::from_peripherals(p);
    let mut bank = PinBank::new(pins);

    let config = load_config();
    info!(
        "Config: {} baud, drive {}/{}/{}/{}, trigger={} echo={}, period={}ms",
        config.serial.baudrate,
        config.drive.left_a,
        config.drive.left_b,
        config.drive.right_a,
        config.drive.right_b,
        config.ranger.trigger_pin,
        config.ranger.echo_pin,
        config.timing.loop_period_ms
    );

    // Motors first so they are released as early as possible
    let (drive, ranger) = match claim_hardware(&mut bank, &config) {
        Ok(hw) => hw,
        Err(e) => {
            error!("Pin setup failed: {:?}", e);
            return;
        }
    };
    info!("Motors released, ranger ready");

    let uart_config = to_embassy_config(&UartConfig::with_baudrate(config.serial.baudrate));
    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = Uart::new_blocking(
        remaining.uart0,
        remaining.uart_tx,
        remaining.uart_rx,
        uart_config,
    );
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    let link = SerialLink::new(RpUartRx::new(rx), RpUartTx::new(tx));

    info!("UART0 initialized at {} baud", config.serial.baudrate);

    let rover = Rover::new(drive, ranger, config.ranger.distance_policy());
    let period = Duration::from_millis(u64::from(config.timing.loop_period_ms));

    spawner.spawn(tasks::rover_task(rover, link, period)).unwrap();

    info!("Rover task spawned, firmware running");
}

/// Parse and validate the embedded configuration
///
/// Falls back to the built-in defaults if the file is rejected, so the
/// rover always boots with its motors released.
fn load_config() -> RoverConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            return RoverConfig::default();
        }
    };

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {:?}", e);
        error!("Using default configuration");
        return RoverConfig::default();
    }

    if let Err(e) = config.validate_pins(BANK_PINS) {
        error!("Pin not available on this board: {:?}", e);
        error!("Using default configuration");
        return RoverConfig::default();
    }

    info!("Parsed embedded configuration successfully");
    config
}

/// Take the motor and ranger pins from the bank
fn claim_hardware(
    bank: &mut PinBank,
    config: &RoverConfig,
) -> Result<(RoverDrive, RoverRanger), PinError> {
    let drive = HBridgePair::new(
        RpOutput::new(bank.take(config.drive.left_a)?),
        RpOutput::new(bank.take(config.drive.left_b)?),
        RpOutput::new(bank.take(config.drive.right_a)?),
        RpOutput::new(bank.take(config.drive.right_b)?),
    );

    let ranger = HcSr04::new(
        RpOutput::new(bank.take(config.ranger.trigger_pin)?),
        EchoPin::new(bank.take(config.ranger.echo_pin)?),
        Delay,
        HcSr04Config::from(&config.ranger),
    );

    Ok((drive, ranger))
}
