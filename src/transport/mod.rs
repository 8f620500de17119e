//! # Transport Session Module
//!
//! Owns the radio for the duration of exactly one send.
//!
//! A session walks a small state machine:
//!
//! ```text
//! Closed -> Opening -> { Ready | Failed }
//! Ready  -> Sending -> { Succeeded | Failed | TimedOut }
//! any terminal state -> Closed via close()
//! ```
//!
//! No retries happen inside a cycle; a failed or timed-out send is reported
//! and the cycle proceeds to sleep regardless. `close()` is idempotent and
//! safe after a partially failed `open()`, so the cycle controller can call
//! it unconditionally on every exit path.

pub mod peer;

use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::error::{NodeError, Result};
use crate::hal::{CompletionRx, PeerMessaging, RadioControl, SendStatus};
use crate::telemetry::TelemetryRecord;
use self::peer::PeerAddress;

/// Outcome of the single send a session performs.
///
/// Written at most once by the completion notification; `Pending` after the
/// wait deadline means the notification never arrived and is
/// failure-equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// No completion notification observed yet
    Pending,
    /// The link layer confirmed delivery
    Succeeded,
    /// The link layer reported failure
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Closed,
    Ready,
    Sending,
    Finished,
    Failed,
}

/// One-shot transport session over the connectionless link.
///
/// Borrows the radio and messaging capabilities for the cycle's duration; no
/// other component may touch them between `open` and `close`.
pub struct TransportSession<'a> {
    radio: &'a mut dyn RadioControl,
    messaging: &'a mut dyn PeerMessaging,
    peer: PeerAddress,
    channel: u8,
    state: SessionState,
    completion: Option<CompletionRx>,
    outcome: SendOutcome,
}

impl<'a> TransportSession<'a> {
    /// Creates a closed session for the given peer.
    #[must_use]
    pub fn new(
        radio: &'a mut dyn RadioControl,
        messaging: &'a mut dyn PeerMessaging,
        peer: PeerAddress,
        channel: u8,
    ) -> Self {
        Self {
            radio,
            messaging,
            peer,
            channel,
            state: SessionState::Closed,
            completion: None,
            outcome: SendOutcome::Pending,
        }
    }

    /// Brings the radio up and registers the configured peer.
    ///
    /// Station mode, explicit disconnect, long-range physical layer,
    /// messaging init, then peer registration with link-layer encryption off.
    ///
    /// # Errors
    ///
    /// * `NodeError::SubsystemInitFailed` - messaging subsystem init failed
    /// * `NodeError::PeerRegistrationFailed` - the peer could not be added
    ///
    /// On either error the session is inert: `send` must not be called, and
    /// `close` remains safe.
    pub async fn open(&mut self) -> Result<()> {
        assert!(
            self.state == SessionState::Closed,
            "open called on a session that is not closed"
        );

        self.radio.set_station_mode().await;
        self.radio.disconnect().await;
        self.radio.set_long_range().await;

        if let Err(e) = self.messaging.init().await {
            self.state = SessionState::Failed;
            return Err(NodeError::SubsystemInitFailed(e.to_string()));
        }
        debug!("messaging subsystem initialized");

        if let Err(e) = self
            .messaging
            .register_peer(&self.peer, self.channel, false)
            .await
        {
            self.state = SessionState::Failed;
            return Err(NodeError::PeerRegistrationFailed(e.to_string()));
        }
        info!("peer {} registered on channel {}", self.peer, self.channel);

        self.state = SessionState::Ready;
        Ok(())
    }

    /// Initiates transmission of one record to the configured peer.
    ///
    /// Returns [`SendOutcome::Pending`] immediately on successful initiation;
    /// the link-layer verdict is observed later via
    /// [`await_completion`](Self::await_completion). An initiation error
    /// yields [`SendOutcome::Failed`] straight away, since no notification
    /// will ever arrive for it.
    ///
    /// # Panics
    ///
    /// Panics if the session is not open; callers must skip the send when
    /// `open` failed.
    pub async fn send(&mut self, record: &TelemetryRecord) -> SendOutcome {
        assert!(
            self.state == SessionState::Ready,
            "send called on a session that is not open"
        );

        let payload = record.to_wire();
        match self.messaging.send(&self.peer, &payload).await {
            Ok(rx) => {
                debug!("{} bytes queued for {}", payload.len(), self.peer);
                self.completion = Some(rx);
                self.state = SessionState::Sending;
                self.outcome = SendOutcome::Pending;
            }
            Err(e) => {
                warn!("send initiation failed: {}", e);
                self.state = SessionState::Failed;
                self.outcome = SendOutcome::Failed;
            }
        }
        self.outcome
    }

    /// Waits (bounded) for the completion notification of the current send.
    ///
    /// Returns the final outcome once the notification arrives, or
    /// [`SendOutcome::Pending`] if `deadline` elapses first — never an error
    /// or a hang. A completion sender dropped without resolving counts as
    /// [`SendOutcome::Failed`].
    pub async fn await_completion(&mut self, deadline: Duration) -> SendOutcome {
        if self.outcome != SendOutcome::Pending {
            return self.outcome;
        }

        let Some(rx) = self.completion.take() else {
            // Nothing in flight; the outcome slot is authoritative.
            return self.outcome;
        };

        self.outcome = match timeout(deadline, rx).await {
            Ok(Ok(SendStatus::Success)) => SendOutcome::Succeeded,
            Ok(Ok(SendStatus::Failure)) => SendOutcome::Failed,
            // Sender dropped without resolving; no verdict will ever come.
            Ok(Err(_)) => SendOutcome::Failed,
            // Timeout: failure-equivalent, but distinguishable from an
            // explicit link-layer failure.
            Err(_) => SendOutcome::Pending,
        };
        self.state = SessionState::Finished;
        self.outcome
    }

    /// Tears the radio down: messaging deinit, disconnect, power off.
    ///
    /// Idempotent, and safe to call after a failed or partial `open`. Runs
    /// on every exit path of the cycle.
    pub async fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }

        self.messaging.deinit().await;
        self.radio.disconnect().await;
        self.radio.power_off().await;

        self.completion = None;
        self.state = SessionState::Closed;
        debug!("transport session closed");
    }

    /// Current outcome of the session's send.
    #[must_use]
    pub fn outcome(&self) -> SendOutcome {
        self.outcome
    }
}
