//! # Hardware Capability Module
//!
//! Trait seams for every piece of hardware the node touches: the ADC, the
//! radio mode control, the connectionless peer-messaging subsystem, the
//! status LED, and the deep-sleep primitive.
//!
//! The cycle controller only ever talks to these traits, so the same core
//! runs against real drivers on target hardware, the simulated
//! implementations in [`sim`] on a development host, and the mocks in tests.

pub mod adc;
pub mod led;
pub mod power;
pub mod radio;
pub mod sim;

pub use adc::AdcReader;
pub use led::StatusLed;
pub use power::SleepControl;
pub use radio::{CompletionRx, PeerMessaging, RadioControl, SendStatus};

/// The full set of capabilities the cycle controller needs.
pub struct Hardware {
    pub adc: Box<dyn AdcReader>,
    pub radio: Box<dyn RadioControl>,
    pub messaging: Box<dyn PeerMessaging>,
    pub led: Box<dyn StatusLed>,
    pub sleep: Box<dyn SleepControl>,
}
