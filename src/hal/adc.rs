//! Trait abstraction for the analog-to-digital converter.

use async_trait::async_trait;

/// Trait for reading raw analog samples.
///
/// One read returns one raw count in `[0, adc_max]` for the given pin. The
/// underlying driver has no documented failure mode, so the read is
/// infallible.
#[async_trait]
pub trait AdcReader: Send {
    /// Read one raw sample from an analog pin
    async fn read(&mut self, pin: u8) -> u16;
}
