//! # Calibration Module
//!
//! Pure mappings from raw ADC counts to physical units.
//!
//! ## Battery curve
//!
//! The battery channel sits behind a resistive divider, so the raw count is
//! first converted to the real pack voltage, then mapped onto the LiPo
//! state-of-charge window (3.0 V empty, 4.2 V full) with clamping at both
//! ends.
//!
//! ## Moisture curve
//!
//! Capacitive soil probes read *lower* the wetter the soil is, so the raw
//! average is mapped from the closed interval `[wet_raw, dry_raw]` onto
//! `[100, 0]` — an inverted linear interpolation. Output is always clamped to
//! `[0, 100]`, even for readings outside the calibrated interval.
//!
//! ## Usage
//!
//! ```
//! use soil_node::calibration::{BatteryCurve, MoistureCurve};
//!
//! let battery = BatteryCurve::new(4095, 3.3, 2.0);
//! assert_eq!(battery.percent(3.6), 50);
//!
//! let moisture = MoistureCurve::new(3738, 1324);
//! assert_eq!(moisture.percent(3738), 0);
//! assert_eq!(moisture.percent(1324), 100);
//! ```

use crate::config::CalibrationConfig;

/// Pack voltage at which the battery reads 0%
pub const BATTERY_EMPTY_VOLTS: f32 = 3.0;

/// Pack voltage at which the battery reads 100%
pub const BATTERY_FULL_VOLTS: f32 = 4.2;

/// Converts raw battery-channel counts to volts and state-of-charge percent.
#[derive(Debug, Clone, Copy)]
pub struct BatteryCurve {
    /// Full-scale ADC count.
    adc_max: u16,
    /// ADC reference voltage in volts.
    ref_voltage: f32,
    /// Divider ratio between pack voltage and ADC input.
    divider_ratio: f32,
}

impl BatteryCurve {
    /// Creates a battery curve for the given converter and divider.
    ///
    /// # Arguments
    ///
    /// * `adc_max` - Full-scale ADC count (4095 for a 12-bit converter)
    /// * `ref_voltage` - ADC reference voltage in volts
    /// * `divider_ratio` - Pack-voltage to ADC-input ratio (2.0 for 100k/100k)
    #[must_use]
    pub fn new(adc_max: u16, ref_voltage: f32, divider_ratio: f32) -> Self {
        Self {
            adc_max,
            ref_voltage,
            divider_ratio,
        }
    }

    /// Creates a battery curve from configuration values.
    #[must_use]
    pub fn from_config(config: &CalibrationConfig) -> Self {
        Self::new(config.adc_max, config.adc_ref_voltage, config.divider_ratio)
    }

    /// Converts a raw ADC count to the pack voltage behind the divider.
    ///
    /// # Examples
    ///
    /// ```
    /// use soil_node::calibration::BatteryCurve;
    ///
    /// let curve = BatteryCurve::new(4095, 3.3, 2.0);
    /// // Full-scale reading corresponds to 6.6 V at the pack
    /// assert!((curve.voltage(4095) - 6.6).abs() < 0.001);
    /// ```
    #[must_use]
    pub fn voltage(&self, raw: u16) -> f32 {
        (raw as f32 / self.adc_max as f32) * self.ref_voltage * self.divider_ratio
    }

    /// Maps a pack voltage onto state-of-charge percent.
    ///
    /// Returns 100 at or above [`BATTERY_FULL_VOLTS`], 0 at or below
    /// [`BATTERY_EMPTY_VOLTS`], linear interpolation between, clamped to
    /// `[0, 100]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use soil_node::calibration::BatteryCurve;
    ///
    /// let curve = BatteryCurve::new(4095, 3.3, 2.0);
    /// assert_eq!(curve.percent(4.2), 100);
    /// assert_eq!(curve.percent(3.0), 0);
    /// assert_eq!(curve.percent(3.9), 75);
    /// ```
    #[must_use]
    pub fn percent(&self, voltage: f32) -> i32 {
        if voltage >= BATTERY_FULL_VOLTS {
            return 100;
        }
        if voltage <= BATTERY_EMPTY_VOLTS {
            return 0;
        }

        let span = BATTERY_FULL_VOLTS - BATTERY_EMPTY_VOLTS;
        let percent = ((voltage - BATTERY_EMPTY_VOLTS) / span * 100.0).round() as i32;
        percent.clamp(0, 100)
    }
}

/// Converts averaged soil-channel counts to a moisture percentage.
///
/// The mapping is inverted: `dry_raw` (reading in open air) maps to 0% and
/// `wet_raw` (fully submerged) maps to 100%.
#[derive(Debug, Clone, Copy)]
pub struct MoistureCurve {
    /// Raw reading in open air. Strictly greater than `wet_raw`.
    dry_raw: u16,
    /// Raw reading fully submerged.
    wet_raw: u16,
}

impl MoistureCurve {
    /// Creates a moisture curve from the two calibration endpoints.
    ///
    /// `dry_raw > wet_raw` is enforced at configuration load, not here.
    #[must_use]
    pub fn new(dry_raw: u16, wet_raw: u16) -> Self {
        Self { dry_raw, wet_raw }
    }

    /// Creates a moisture curve from configuration values.
    #[must_use]
    pub fn from_config(config: &CalibrationConfig) -> Self {
        Self::new(config.soil_dry_raw, config.soil_wet_raw)
    }

    /// Maps a raw soil average onto moisture percent.
    ///
    /// Integer linear interpolation over `[wet_raw, dry_raw]`, clamped to
    /// `[0, 100]` for any input.
    ///
    /// # Examples
    ///
    /// ```
    /// use soil_node::calibration::MoistureCurve;
    ///
    /// let curve = MoistureCurve::new(3738, 1324);
    /// assert_eq!(curve.percent(3738), 0);
    /// assert_eq!(curve.percent(1324), 100);
    /// assert_eq!(curve.percent(2531), 50);
    /// ```
    #[must_use]
    pub fn percent(&self, raw_average: u16) -> i32 {
        let dry = self.dry_raw as i32;
        let wet = self.wet_raw as i32;
        let raw = raw_average as i32;

        let percent = (dry - raw) * 100 / (dry - wet);
        percent.clamp(0, 100)
    }
}
