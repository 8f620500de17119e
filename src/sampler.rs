//! # Sampler Module
//!
//! Reduces repeated raw ADC reads of one channel to a stable averaged value.
//!
//! Capacitive probes and multiplexed ADCs are noisy read-to-read, so each
//! measurement takes several raw samples with a settling delay between them
//! and reports the truncating-integer mean.

use std::time::Duration;
use tokio::time::sleep;
use tracing::trace;

use crate::hal::AdcReader;

/// Samples one analog channel and returns the averaged reading.
///
/// Performs `count` raw reads of `pin`, sleeping `delay` between consecutive
/// reads, and returns the truncating-integer mean.
///
/// # Arguments
///
/// * `adc` - ADC capability to read from
/// * `pin` - Analog pin to sample
/// * `count` - Number of raw reads to average; must be at least 1
/// * `delay` - Settling delay between consecutive reads
///
/// # Panics
///
/// Panics if `count` is 0; that is a caller contract violation, not a
/// readable measurement.
pub async fn sample_channel(
    adc: &mut dyn AdcReader,
    pin: u8,
    count: u32,
    delay: Duration,
) -> u16 {
    assert!(count >= 1, "sample_channel requires at least one sample");

    let mut sum: u64 = 0;
    for i in 0..count {
        let raw = adc.read(pin).await;
        trace!("pin {} raw sample {}/{}: {}", pin, i + 1, count, raw);
        sum += raw as u64;

        if i + 1 < count && !delay.is_zero() {
            sleep(delay).await;
        }
    }

    (sum / count as u64) as u16
}
