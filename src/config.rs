//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! The calibration endpoints, voltage divider ratio, and peer address are
//! hardware- and deployment-specific tuning values, so they live here rather
//! than in code. Defaults match the reference sensor build (ESP32-C3 class
//! ADC, 100k/100k battery divider, capacitive soil probe).

use serde::Deserialize;
use serde::de::Error;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::transport::peer::PeerAddress;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub sensing: SensingConfig,
    #[serde(default)]
    pub calibration: CalibrationConfig,
    #[serde(default)]
    pub radio: RadioConfig,
    #[serde(default)]
    pub power: PowerConfig,
}

/// Analog sampling configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SensingConfig {
    #[serde(default = "default_battery_pin")]
    pub battery_pin: u8,

    #[serde(default = "default_soil_pin")]
    pub soil_pin: u8,

    /// Raw reads averaged per soil measurement
    #[serde(default = "default_num_samples")]
    pub num_samples: u32,

    /// Settling delay between consecutive raw reads
    #[serde(default = "default_inter_sample_delay_ms")]
    pub inter_sample_delay_ms: u64,
}

/// Sensor calibration endpoints
#[derive(Debug, Deserialize, Clone)]
pub struct CalibrationConfig {
    /// Full-scale ADC count (12-bit converter by default)
    #[serde(default = "default_adc_max")]
    pub adc_max: u16,

    /// ADC reference voltage in volts
    #[serde(default = "default_adc_ref_voltage")]
    pub adc_ref_voltage: f32,

    /// Battery divider ratio (2.0 for a 50% divider)
    #[serde(default = "default_divider_ratio")]
    pub divider_ratio: f32,

    /// Raw soil reading in open air (0% moisture)
    #[serde(default = "default_soil_dry_raw")]
    pub soil_dry_raw: u16,

    /// Raw soil reading fully submerged (100% moisture)
    #[serde(default = "default_soil_wet_raw")]
    pub soil_wet_raw: u16,
}

/// Radio and peer configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RadioConfig {
    /// Receiver hardware address, colon-separated hex
    #[serde(default = "default_peer_address")]
    pub peer_address: String,

    /// Wireless channel; 0 means "use current channel"
    #[serde(default)]
    pub channel: u8,

    /// Bound on waiting for the send-completion notification
    #[serde(default = "default_send_timeout_ms")]
    pub send_timeout_ms: u64,
}

/// Power management configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PowerConfig {
    /// Suspend duration between cycles
    #[serde(default = "default_sleep_duration_s")]
    pub sleep_duration_s: u64,
}

// Default value functions
fn default_battery_pin() -> u8 { 0 }
fn default_soil_pin() -> u8 { 1 }
fn default_num_samples() -> u32 { 10 }
fn default_inter_sample_delay_ms() -> u64 { 10 }

fn default_adc_max() -> u16 { 4095 }
fn default_adc_ref_voltage() -> f32 { 3.3 }
fn default_divider_ratio() -> f32 { 2.0 }
fn default_soil_dry_raw() -> u16 { 3738 }
fn default_soil_wet_raw() -> u16 { 1324 }

fn default_peer_address() -> String { "ff:ff:ff:ff:ff:ff".to_string() }
fn default_send_timeout_ms() -> u64 { 2000 }

fn default_sleep_duration_s() -> u64 { 5 }

impl Default for SensingConfig {
    fn default() -> Self {
        Self {
            battery_pin: default_battery_pin(),
            soil_pin: default_soil_pin(),
            num_samples: default_num_samples(),
            inter_sample_delay_ms: default_inter_sample_delay_ms(),
        }
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            adc_max: default_adc_max(),
            adc_ref_voltage: default_adc_ref_voltage(),
            divider_ratio: default_divider_ratio(),
            soil_dry_raw: default_soil_dry_raw(),
            soil_wet_raw: default_soil_wet_raw(),
        }
    }
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            peer_address: default_peer_address(),
            channel: 0,
            send_timeout_ms: default_send_timeout_ms(),
        }
    }
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            sleep_duration_s: default_sleep_duration_s(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sensing: SensingConfig::default(),
            calibration: CalibrationConfig::default(),
            radio: RadioConfig::default(),
            power: PowerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use soil_node::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), soil_node::error::NodeError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse the configured peer address
    ///
    /// # Errors
    ///
    /// Returns `NodeError::InvalidPeerAddress` if the string does not parse
    /// as six colon-separated hex octets.
    pub fn peer_address(&self) -> Result<PeerAddress> {
        self.radio.peer_address.parse()
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        if self.sensing.num_samples == 0 {
            return Err(crate::error::NodeError::Config(
                toml::de::Error::custom("num_samples must be at least 1")
            ));
        }

        if self.sensing.inter_sample_delay_ms > 1000 {
            return Err(crate::error::NodeError::Config(
                toml::de::Error::custom("inter_sample_delay_ms must be at most 1000")
            ));
        }

        if self.sensing.battery_pin == self.sensing.soil_pin {
            return Err(crate::error::NodeError::Config(
                toml::de::Error::custom("battery_pin and soil_pin must differ")
            ));
        }

        if self.calibration.adc_max == 0 {
            return Err(crate::error::NodeError::Config(
                toml::de::Error::custom("adc_max must be greater than 0")
            ));
        }

        if self.calibration.adc_ref_voltage <= 0.0 {
            return Err(crate::error::NodeError::Config(
                toml::de::Error::custom("adc_ref_voltage must be positive")
            ));
        }

        if self.calibration.divider_ratio < 1.0 {
            return Err(crate::error::NodeError::Config(
                toml::de::Error::custom("divider_ratio must be at least 1.0")
            ));
        }

        // The moisture mapping divides by (dry - wet); dry must sit strictly
        // above wet on the raw scale.
        if self.calibration.soil_dry_raw <= self.calibration.soil_wet_raw {
            return Err(crate::error::NodeError::Config(
                toml::de::Error::custom("soil_dry_raw must be greater than soil_wet_raw")
            ));
        }

        if self.calibration.soil_dry_raw > self.calibration.adc_max {
            return Err(crate::error::NodeError::Config(
                toml::de::Error::custom("soil_dry_raw must not exceed adc_max")
            ));
        }

        if self.radio.send_timeout_ms == 0 || self.radio.send_timeout_ms > 60000 {
            return Err(crate::error::NodeError::Config(
                toml::de::Error::custom("send_timeout_ms must be between 1 and 60000")
            ));
        }

        if self.radio.channel > 14 {
            return Err(crate::error::NodeError::Config(
                toml::de::Error::custom("channel must be between 0 and 14")
            ));
        }

        if self.radio.peer_address.parse::<PeerAddress>().is_err() {
            return Err(crate::error::NodeError::Config(
                toml::de::Error::custom(format!(
                    "peer_address '{}' is not a valid 6-octet address",
                    self.radio.peer_address
                ))
            ));
        }

        if self.power.sleep_duration_s == 0 {
            return Err(crate::error::NodeError::Config(
                toml::de::Error::custom("sleep_duration_s must be greater than 0")
            ));
        }

        Ok(())
    }
}
