//! Build script for rover-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates rover.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use rover_core::config::{parse_config, RoverConfig};

/// GPIO numbers the pin bank can hand out (GPIO0/1 carry UART0)
const BANK_PINS: RangeInclusive<u8> = 2..=29;

/// Highest baud rate the RP2040 UART is driven at
const MAX_BAUDRATE: u32 = 921_600;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate rover.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=rover.toml");

    let config_path = Path::new("rover.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: rover.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds rover.toml at build time.                   ║\n\
            ║  Please create one in the rover-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read rover.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: RoverConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid rover.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = check_config(&config);

    // The firmware reads the file with its own line parser
    match parse_config(&config_content) {
        Ok(parsed) if parsed == config => {}
        Ok(_) => errors.push("firmware parser reads different values".to_string()),
        Err(e) => errors.push(format!("line {}: {:?} in firmware parser", e.line, e.kind)),
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid rover.toml                                       ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=rover.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collect everything the firmware would reject at boot
fn check_config(config: &RoverConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if let Err(e) = config.validate() {
        errors.push(format!("{:?}", e));
    }
    if let Err(e) = config.validate_pins(BANK_PINS) {
        errors.push(format!(
            "{:?}: usable pins are gpio{}-gpio{}",
            e,
            BANK_PINS.start(),
            BANK_PINS.end()
        ));
    }
    if config.serial.baudrate > MAX_BAUDRATE {
        errors.push(format!("baudrate must be at most {}", MAX_BAUDRATE));
    }

    errors
}
