//! # Telemetry Record Module
//!
//! The fixed-layout payload transmitted once per cycle.
//!
//! ## Wire format
//!
//! The receiving hub deserializes the exact field order and widths below, so
//! any change to order, width, or count is a breaking wire-format change:
//!
//! ```text
//! offset  0: battery_voltage  f32, little-endian
//! offset  4: battery_percent  i32, little-endian
//! offset  8: soil_moisture    i32, little-endian
//! offset 12: timestamp_ms     u32, little-endian
//! ```
//!
//! No length prefix, no framing. 16 bytes total.

use bytes::{Buf, BufMut, BytesMut};

/// Serialized size of a [`TelemetryRecord`] in bytes
pub const WIRE_SIZE: usize = 16;

/// One cycle's measurements, immutable once assembled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryRecord {
    /// Battery pack voltage in volts
    pub battery_voltage: f32,
    /// Battery state of charge, 0-100
    pub battery_percent: i32,
    /// Soil moisture, 0-100
    pub soil_moisture: i32,
    /// Milliseconds since this boot (not wall-clock time)
    pub timestamp_ms: u32,
}

impl TelemetryRecord {
    /// Serializes the record into its fixed wire layout.
    ///
    /// # Examples
    ///
    /// ```
    /// use soil_node::telemetry::{TelemetryRecord, WIRE_SIZE};
    ///
    /// let record = TelemetryRecord {
    ///     battery_voltage: 3.9,
    ///     battery_percent: 75,
    ///     soil_moisture: 50,
    ///     timestamp_ms: 1234,
    /// };
    /// assert_eq!(record.to_wire().len(), WIRE_SIZE);
    /// ```
    #[must_use]
    pub fn to_wire(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(WIRE_SIZE);
        buf.put_f32_le(self.battery_voltage);
        buf.put_i32_le(self.battery_percent);
        buf.put_i32_le(self.soil_moisture);
        buf.put_u32_le(self.timestamp_ms);
        buf.to_vec()
    }

    /// Deserializes a record from its wire layout.
    ///
    /// This is the hub-side counterpart of [`to_wire`](Self::to_wire).
    /// Returns `None` unless `bytes` is exactly [`WIRE_SIZE`] long.
    #[must_use]
    pub fn from_wire(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != WIRE_SIZE {
            return None;
        }

        let mut buf = bytes;
        Some(Self {
            battery_voltage: buf.get_f32_le(),
            battery_percent: buf.get_i32_le(),
            soil_moisture: buf.get_i32_le(),
            timestamp_ms: buf.get_u32_le(),
        })
    }
}
