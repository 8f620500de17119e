//! Trait abstraction for the deep-sleep primitive.

use async_trait::async_trait;
use std::time::Duration;

/// Trait for suspending the node between cycles.
///
/// On target hardware this is a genuine low-power suspend that resumes at
/// the program entry point with all volatile memory discarded. Host builds
/// substitute a timed delay; the cycle controller carries no state across
/// the call either way, so the two are functionally identical.
#[async_trait]
pub trait SleepControl: Send {
    /// Suspend for the given duration, then resume
    async fn suspend_for(&mut self, duration: Duration);
}
