//! Simulated hardware for running the node on a development host.
//!
//! The simulation mirrors the debug build of the reference firmware: the
//! "radio" is a loopback whose completion notification fires success after a
//! short link delay, and "deep sleep" is a plain timed delay followed by a
//! fresh cycle (restart-as-sleep). The ADC returns configured baselines with
//! a small deterministic wobble so consecutive cycles produce plausibly
//! varying readings.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::config::Config;
use crate::hal::{
    AdcReader, CompletionRx, Hardware, PeerMessaging, RadioControl, SendStatus, SleepControl,
    StatusLed,
};
use crate::transport::peer::PeerAddress;

/// Simulated link delay before a completion notification fires
const SIM_LINK_DELAY: Duration = Duration::from_millis(50);

/// Simulated ADC with fixed per-pin baselines and a deterministic wobble.
pub struct SimAdc {
    baselines: HashMap<u8, u16>,
    wobble: u16,
    counter: u32,
}

impl SimAdc {
    /// Creates a simulated ADC; unknown pins read 0.
    #[must_use]
    pub fn new(baselines: HashMap<u8, u16>, wobble: u16) -> Self {
        Self {
            baselines,
            wobble,
            counter: 0,
        }
    }
}

#[async_trait]
impl AdcReader for SimAdc {
    async fn read(&mut self, pin: u8) -> u16 {
        let base = self.baselines.get(&pin).copied().unwrap_or(0) as i32;
        let spread = 2 * self.wobble as i32 + 1;
        let offset = (self.counter as i32 % spread) - self.wobble as i32;
        self.counter = self.counter.wrapping_add(1);

        (base + offset).clamp(0, u16::MAX as i32) as u16
    }
}

/// Simulated radio mode control; mode switches are logged and otherwise
/// instantaneous.
pub struct SimRadio;

#[async_trait]
impl RadioControl for SimRadio {
    async fn set_station_mode(&mut self) {
        debug!("sim radio: station mode");
    }

    async fn disconnect(&mut self) {
        debug!("sim radio: disconnected");
    }

    async fn set_long_range(&mut self) {
        debug!("sim radio: long-range PHY selected");
    }

    async fn power_off(&mut self) {
        debug!("sim radio: powered off");
    }
}

/// Simulated peer-messaging subsystem.
///
/// Every send completes with link-layer success after [`SIM_LINK_DELAY`].
pub struct SimMessaging {
    initialized: bool,
}

impl SimMessaging {
    #[must_use]
    pub fn new() -> Self {
        Self { initialized: false }
    }
}

impl Default for SimMessaging {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PeerMessaging for SimMessaging {
    async fn init(&mut self) -> io::Result<()> {
        self.initialized = true;
        debug!("sim messaging: initialized");
        Ok(())
    }

    async fn register_peer(
        &mut self,
        peer: &PeerAddress,
        channel: u8,
        encrypted: bool,
    ) -> io::Result<()> {
        if !self.initialized {
            return Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "messaging subsystem not initialized",
            ));
        }
        debug!(
            "sim messaging: peer {} registered (channel {}, encrypted: {})",
            peer, channel, encrypted
        );
        Ok(())
    }

    async fn send(&mut self, peer: &PeerAddress, payload: &[u8]) -> io::Result<CompletionRx> {
        if !self.initialized {
            return Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "messaging subsystem not initialized",
            ));
        }
        debug!("sim messaging: {} bytes queued for {}", payload.len(), peer);

        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            tokio::time::sleep(SIM_LINK_DELAY).await;
            let _ = tx.send(SendStatus::Success);
        });
        Ok(rx)
    }

    async fn deinit(&mut self) {
        self.initialized = false;
        debug!("sim messaging: deinitialized");
    }
}

/// Restart-as-sleep: a timed delay standing in for deep sleep on host runs.
pub struct SimSleep;

#[async_trait]
impl SleepControl for SimSleep {
    async fn suspend_for(&mut self, duration: Duration) {
        info!("Waiting {} seconds before next reading...", duration.as_secs());
        tokio::time::sleep(duration).await;
    }
}

/// LED that blinks into the log.
pub struct SimLed;

#[async_trait]
impl StatusLed for SimLed {
    async fn blink(&mut self, times: u32, period: Duration) {
        for _ in 0..times {
            debug!("sim led: on");
            tokio::time::sleep(period).await;
            debug!("sim led: off");
            tokio::time::sleep(period).await;
        }
    }
}

/// Builds a fully simulated hardware set for the given configuration.
///
/// Baselines correspond to roughly 3.9 V at the battery divider and a soil
/// reading midway between the calibration endpoints.
#[must_use]
pub fn simulated_hardware(config: &Config) -> Hardware {
    let battery_baseline = 2420;
    let soil_baseline =
        (config.calibration.soil_dry_raw + config.calibration.soil_wet_raw) / 2;

    let mut baselines = HashMap::new();
    baselines.insert(config.sensing.battery_pin, battery_baseline);
    baselines.insert(config.sensing.soil_pin, soil_baseline);

    Hardware {
        adc: Box::new(SimAdc::new(baselines, 8)),
        radio: Box::new(SimRadio),
        messaging: Box::new(SimMessaging::new()),
        led: Box::new(SimLed),
        sleep: Box::new(SimSleep),
    }
}
