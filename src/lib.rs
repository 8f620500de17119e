//! # Soil Node Library
//!
//! Battery-powered soil moisture telemetry node.
//!
//! This library provides the core functionality for one measurement cycle:
//! sampling two analog channels, calibrating the readings into a battery
//! state-of-charge estimate and a moisture percentage, and transmitting a
//! fixed-layout telemetry record to a single peer over a connectionless
//! wireless link before suspending until the next wake.

pub mod calibration;
pub mod config;
pub mod cycle;
pub mod error;
pub mod hal;
pub mod sampler;
pub mod telemetry;
pub mod transport;
