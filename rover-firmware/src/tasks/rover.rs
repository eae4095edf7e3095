//! Command/sensor loop task
//!
//! Each iteration takes at most one pending command byte, applies it,
//! samples the ranger, sends one telemetry line and then sleeps for the
//! loop period.

use defmt::*;
use embassy_time::{Delay, Duration, Timer};

use rover_core::{CommandOutcome, Rover};
use rover_drivers::link::SerialLink;
use rover_drivers::motor::HBridgePair;
use rover_drivers::ranger::HcSr04;
use rover_hal_rp2040::{EchoPin, RpOutput, RpUartRx, RpUartTx};

/// Drive train as wired on the board
pub type RoverDrive = HBridgePair<RpOutput, RpOutput, RpOutput, RpOutput>;

/// Ranger as wired on the board
pub type RoverRanger = HcSr04<RpOutput, EchoPin, Delay>;

/// Rover task - runs the command/sensor loop forever
#[embassy_executor::task]
pub async fn rover_task(
    mut rover: Rover<RoverDrive, RoverRanger>,
    mut link: SerialLink<RpUartRx, RpUartTx>,
    period: Duration,
) {
    info!("Rover task started, drive={:?}", rover.drive_state());
    info!(
        "Echo timeout {}us, no-echo fallback {}cm",
        rover.ranger().config().echo_timeout_us,
        rover.policy().no_echo_cm
    );

    loop {
        let pending = match link.poll_command() {
            Ok(byte) => byte,
            Err(e) => {
                warn!("Serial error: {:?}", e);
                None
            }
        };

        let iteration = rover.step(pending);

        match iteration.command {
            Some(outcome @ CommandOutcome::Applied { previous, current }) if outcome.changed() => {
                debug!("Drive {:?} -> {:?}", previous, current);
            }
            Some(CommandOutcome::Ignored(byte)) => {
                debug!("Ignored byte 0x{:02x}", byte);
            }
            _ => {}
        }

        if !iteration.reading.is_echo() {
            trace!("No echo, reporting {} cm", iteration.reading.cm());
        }

        let line = iteration.line();
        match link.send_line(&line) {
            Ok(()) => trace!("D:{}", line.cm),
            Err(e) => warn!("Telemetry send failed: {:?}", e),
        }

        Timer::after(period).await;
    }
}
