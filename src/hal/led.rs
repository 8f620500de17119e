//! Trait abstraction for the status LED.

use async_trait::async_trait;
use std::time::Duration;

/// Trait for the boot-indication LED.
///
/// Purely informational; correctness of the cycle never depends on it.
#[async_trait]
pub trait StatusLed: Send {
    /// Blink `times` times with the given on/off period
    async fn blink(&mut self, times: u32, period: Duration);
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock LED that records blink requests without waiting
    #[derive(Clone)]
    pub struct MockLed {
        pub blinks: Arc<Mutex<Vec<(u32, Duration)>>>,
    }

    impl MockLed {
        pub fn new() -> Self {
            Self {
                blinks: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl StatusLed for MockLed {
        async fn blink(&mut self, times: u32, period: Duration) {
            self.blinks.lock().unwrap().push((times, period));
        }
    }
}
