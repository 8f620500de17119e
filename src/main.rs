//! # Soil Node
//!
//! Battery-powered soil moisture telemetry node.
//!
//! Each wake cycle samples the battery and soil channels, calibrates the
//! readings, transmits one fixed-layout telemetry record to the configured
//! peer over the connectionless link, and suspends until the next cycle.

use anyhow::Result;
use std::path::Path;
use tracing::info;
use tracing_subscriber;

mod calibration;
mod config;
mod cycle;
mod error;
mod hal;
mod sampler;
mod telemetry;
mod transport;

use config::Config;
use cycle::CycleController;
use hal::sim::simulated_hardware;

/// Configuration file used when no path is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Main entry point for the soil node
///
/// Loads configuration, wires up the hardware capabilities, and hands
/// control to the cycle controller, which runs wake cycles until the
/// process is stopped.
///
/// This build runs against the simulated hardware in [`hal::sim`], the
/// host-side equivalent of the firmware's debug mode: deep sleep becomes a
/// timed delay and the radio is a loopback whose completion notification
/// reports success. A target build substitutes real drivers behind the same
/// traits.
///
/// # Errors
///
/// Returns error if the configuration file cannot be loaded or fails
/// validation.
///
/// # Examples
///
/// Run with the default configuration:
/// ```bash
/// cargo run --release
/// ```
///
/// Expected output:
/// ```text
/// INFO soil_node: Soil Node v0.1.0 starting...
/// INFO soil_node::cycle: === soil moisture node: wake cycle 1 ===
/// INFO soil_node::cycle: Battery: 3.90 V (75%)
/// INFO soil_node::cycle: Soil moisture: 50%
/// INFO soil_node::cycle: Record sent successfully
/// ```
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .init();

    info!("Soil Node v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            Config::load(path)?
        }
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            info!("Loading configuration from {}", DEFAULT_CONFIG_PATH);
            Config::load(DEFAULT_CONFIG_PATH)?
        }
        None => {
            info!("No configuration file found, using built-in defaults");
            Config::default()
        }
    };

    let hardware = simulated_hardware(&config);
    let mut controller = CycleController::new(config, hardware)?;

    info!("Entering wake-measure-transmit-sleep loop");
    info!("Press Ctrl+C to exit");

    tokio::select! {
        _ = controller.run() => {
            // run() never completes; cycles repeat until shutdown.
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path() {
        assert_eq!(DEFAULT_CONFIG_PATH, "config/default.toml");
    }

    #[test]
    fn test_builtin_defaults_are_usable() {
        // The no-config-file fallback must produce a valid controller input
        let config = Config::default();
        assert!(config.validate().is_ok());
    }
}
