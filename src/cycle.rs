//! # Cycle Controller Module
//!
//! The top-level sequence executed on every wake:
//!
//! 1. boot indication on the status LED
//! 2. sample and calibrate battery voltage/percent
//! 3. sample and calibrate soil moisture
//! 4. stamp the record with elapsed time since this boot
//! 5. open the transport session (on failure, skip the send)
//! 6. send the record and await completion with a bounded timeout
//! 7. close the transport session unconditionally
//! 8. suspend for the configured duration and start over
//!
//! Each step hard-depends on the previous one; there is no parallelism. Every
//! error is terminal for the cycle but never for the process — all paths
//! reach the suspend step, so the node always tries again. No in-memory state
//! crosses a cycle boundary.

use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::calibration::{BatteryCurve, MoistureCurve};
use crate::config::Config;
use crate::error::Result;
use crate::hal::Hardware;
use crate::sampler::sample_channel;
use crate::telemetry::TelemetryRecord;
use crate::transport::peer::PeerAddress;
use crate::transport::{SendOutcome, TransportSession};

/// Boot indication: blink count
const BOOT_BLINK_COUNT: u32 = 3;

/// Boot indication: on/off period per blink
const BOOT_BLINK_PERIOD: Duration = Duration::from_millis(150);

/// How a wake cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The record was sent and the link layer confirmed delivery
    Sent,
    /// The link layer explicitly reported a failed send
    SendFailed,
    /// No completion notification arrived before the timeout
    SendTimedOut,
    /// The transport could not be opened; the send was skipped
    TransportUnavailable,
}

/// Everything one cycle measured and what became of it.
#[derive(Debug, Clone, Copy)]
pub struct CycleReport {
    /// The assembled telemetry record
    pub record: TelemetryRecord,
    /// Raw soil ADC average behind the moisture percentage
    pub soil_raw_average: u16,
    /// How the cycle ended
    pub outcome: CycleOutcome,
}

/// Orchestrates wake cycles over the hardware capabilities.
pub struct CycleController {
    config: Config,
    peer: PeerAddress,
    battery_curve: BatteryCurve,
    moisture_curve: MoistureCurve,
    hardware: Hardware,
    cycles: u64,
}

impl CycleController {
    /// Creates a controller from validated configuration and hardware.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration fails validation or the peer
    /// address does not parse.
    pub fn new(config: Config, hardware: Hardware) -> Result<Self> {
        config.validate()?;
        let peer = config.peer_address()?;
        if peer.is_broadcast() {
            warn!(
                "peer address is the broadcast placeholder; \
                 configure the real receiver address for acknowledged sends"
            );
        }

        let battery_curve = BatteryCurve::from_config(&config.calibration);
        let moisture_curve = MoistureCurve::from_config(&config.calibration);

        Ok(Self {
            config,
            peer,
            battery_curve,
            moisture_curve,
            hardware,
            cycles: 0,
        })
    }

    /// Runs wake cycles forever, suspending between them.
    ///
    /// This is the process entry loop: cycle, suspend, repeat. It never
    /// returns; shut the node down by dropping the future.
    pub async fn run(&mut self) {
        loop {
            let report = self.run_cycle().await;
            debug!("cycle ended with outcome {:?}", report.outcome);

            let sleep_duration = Duration::from_secs(self.config.power.sleep_duration_s);
            self.hardware.sleep.suspend_for(sleep_duration).await;
        }
    }

    /// Executes one wake cycle: steps 1 through 7.
    ///
    /// The suspend (step 8) lives in [`run`](Self::run) so tests can observe
    /// a single cycle. Never fails; transport errors are folded into the
    /// returned [`CycleReport`].
    pub async fn run_cycle(&mut self) -> CycleReport {
        // Each wake is a fresh boot; the timestamp restarts with it.
        let boot = Instant::now();
        self.cycles += 1;
        info!("=== soil moisture node: wake cycle {} ===", self.cycles);

        self.hardware
            .led
            .blink(BOOT_BLINK_COUNT, BOOT_BLINK_PERIOD)
            .await;

        let battery_raw = sample_channel(
            self.hardware.adc.as_mut(),
            self.config.sensing.battery_pin,
            1,
            Duration::ZERO,
        )
        .await;
        let battery_voltage = self.battery_curve.voltage(battery_raw);
        let battery_percent = self.battery_curve.percent(battery_voltage);
        info!("Battery: {:.2} V ({}%)", battery_voltage, battery_percent);

        let soil_raw_average = sample_channel(
            self.hardware.adc.as_mut(),
            self.config.sensing.soil_pin,
            self.config.sensing.num_samples,
            Duration::from_millis(self.config.sensing.inter_sample_delay_ms),
        )
        .await;
        debug!("Raw soil ADC average: {}", soil_raw_average);
        let soil_moisture = self.moisture_curve.percent(soil_raw_average);
        info!("Soil moisture: {}%", soil_moisture);

        let record = TelemetryRecord {
            battery_voltage,
            battery_percent,
            soil_moisture,
            timestamp_ms: boot.elapsed().as_millis() as u32,
        };

        let mut session = TransportSession::new(
            self.hardware.radio.as_mut(),
            self.hardware.messaging.as_mut(),
            self.peer,
            self.config.radio.channel,
        );

        let outcome = match session.open().await {
            Ok(()) => {
                info!("Sending telemetry record to {}...", self.peer);
                session.send(&record).await;

                let deadline = Duration::from_millis(self.config.radio.send_timeout_ms);
                match session.await_completion(deadline).await {
                    SendOutcome::Succeeded => {
                        info!("Record sent successfully");
                        CycleOutcome::Sent
                    }
                    SendOutcome::Failed => {
                        warn!("Link layer reported send failure");
                        CycleOutcome::SendFailed
                    }
                    SendOutcome::Pending => {
                        warn!(
                            "No send confirmation within {} ms",
                            self.config.radio.send_timeout_ms
                        );
                        CycleOutcome::SendTimedOut
                    }
                }
            }
            Err(e) => {
                warn!("Transport unavailable this cycle: {}", e);
                CycleOutcome::TransportUnavailable
            }
        };

        // Teardown runs on every path, including failed open.
        session.close().await;

        CycleReport {
            record,
            soil_raw_average,
            outcome,
        }
    }
}
