//! Trait abstractions for the wireless radio and the connectionless
//! peer-messaging subsystem.
//!
//! The two concerns are split the way the underlying stacks split them:
//! [`RadioControl`] covers physical-layer mode switches, [`PeerMessaging`]
//! covers the ESP-NOW style datagram service layered on top of it.

use async_trait::async_trait;
use std::io;
use tokio::sync::oneshot;

use crate::transport::peer::PeerAddress;

/// Link-layer verdict carried by a send-completion notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStatus {
    /// The frame was acknowledged by the receiver's link layer
    Success,
    /// The frame was not acknowledged
    Failure,
}

/// Single-shot receiver for the completion notification of one send.
///
/// The messaging implementation resolves it at most once; dropping the
/// sending half without resolving counts as a failed send.
pub type CompletionRx = oneshot::Receiver<SendStatus>;

/// Trait for physical-layer radio mode control.
///
/// Mode switches on the reference hardware cannot fail, so these are
/// infallible.
#[async_trait]
pub trait RadioControl: Send {
    /// Put the radio into station mode
    async fn set_station_mode(&mut self);

    /// Drop any network association
    async fn disconnect(&mut self);

    /// Select the long-range physical layer mode
    async fn set_long_range(&mut self);

    /// Power the radio down
    async fn power_off(&mut self);
}

/// Trait for the connectionless peer-messaging subsystem.
#[async_trait]
pub trait PeerMessaging: Send {
    /// Initialize the messaging subsystem
    async fn init(&mut self) -> io::Result<()>;

    /// Register a peer for subsequent sends
    async fn register_peer(
        &mut self,
        peer: &PeerAddress,
        channel: u8,
        encrypted: bool,
    ) -> io::Result<()>;

    /// Initiate transmission of one datagram to a registered peer.
    ///
    /// Returns immediately; the link-layer verdict arrives later through the
    /// returned completion receiver.
    async fn send(&mut self, peer: &PeerAddress, payload: &[u8]) -> io::Result<CompletionRx>;

    /// Deinitialize the messaging subsystem.
    ///
    /// Must be safe to call when the subsystem was never initialized or is
    /// already deinitialized.
    async fn deinit(&mut self);
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Mock radio that records mode switches in call order
    #[derive(Clone)]
    pub struct MockRadio {
        pub calls: Arc<Mutex<Vec<&'static str>>>,
    }

    impl MockRadio {
        pub fn new() -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn call_count(&self, name: &str) -> usize {
            self.calls.lock().unwrap().iter().filter(|&&c| c == name).count()
        }
    }

    #[async_trait]
    impl RadioControl for MockRadio {
        async fn set_station_mode(&mut self) {
            self.calls.lock().unwrap().push("set_station_mode");
        }

        async fn disconnect(&mut self) {
            self.calls.lock().unwrap().push("disconnect");
        }

        async fn set_long_range(&mut self) {
            self.calls.lock().unwrap().push("set_long_range");
        }

        async fn power_off(&mut self) {
            self.calls.lock().unwrap().push("power_off");
        }
    }

    /// How the mock messaging subsystem resolves a send
    #[derive(Debug, Clone, Copy)]
    pub enum CompletionBehavior {
        /// Resolve with the given status after the given delay
        After(Duration, SendStatus),
        /// Never resolve; the completion sender is kept alive
        Never,
        /// Drop the completion sender without resolving
        DropSender,
    }

    /// Mock peer-messaging subsystem with scriptable failures and
    /// completion timing
    #[derive(Clone)]
    pub struct MockMessaging {
        pub behavior: Arc<Mutex<CompletionBehavior>>,
        pub init_error: Arc<Mutex<Option<io::ErrorKind>>>,
        pub register_error: Arc<Mutex<Option<io::ErrorKind>>>,
        pub send_error: Arc<Mutex<Option<io::ErrorKind>>>,
        pub registered_peers: Arc<Mutex<Vec<(PeerAddress, u8, bool)>>>,
        pub sent_payloads: Arc<Mutex<Vec<(PeerAddress, Vec<u8>)>>>,
        pub init_count: Arc<Mutex<usize>>,
        pub deinit_count: Arc<Mutex<usize>>,
        // Keeps unresolved senders alive for the Never behavior
        parked_senders: Arc<Mutex<Vec<oneshot::Sender<SendStatus>>>>,
    }

    impl MockMessaging {
        pub fn new(behavior: CompletionBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                init_error: Arc::new(Mutex::new(None)),
                register_error: Arc::new(Mutex::new(None)),
                send_error: Arc::new(Mutex::new(None)),
                registered_peers: Arc::new(Mutex::new(Vec::new())),
                sent_payloads: Arc::new(Mutex::new(Vec::new())),
                init_count: Arc::new(Mutex::new(0)),
                deinit_count: Arc::new(Mutex::new(0)),
                parked_senders: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn set_init_error(&self, error: io::ErrorKind) {
            *self.init_error.lock().unwrap() = Some(error);
        }

        pub fn set_register_error(&self, error: io::ErrorKind) {
            *self.register_error.lock().unwrap() = Some(error);
        }

        pub fn set_send_error(&self, error: io::ErrorKind) {
            *self.send_error.lock().unwrap() = Some(error);
        }

        pub fn deinit_count(&self) -> usize {
            *self.deinit_count.lock().unwrap()
        }
    }

    #[async_trait]
    impl PeerMessaging for MockMessaging {
        async fn init(&mut self) -> io::Result<()> {
            if let Some(kind) = *self.init_error.lock().unwrap() {
                return Err(io::Error::new(kind, "mock init error"));
            }
            *self.init_count.lock().unwrap() += 1;
            Ok(())
        }

        async fn register_peer(
            &mut self,
            peer: &PeerAddress,
            channel: u8,
            encrypted: bool,
        ) -> io::Result<()> {
            if let Some(kind) = *self.register_error.lock().unwrap() {
                return Err(io::Error::new(kind, "mock register error"));
            }
            self.registered_peers.lock().unwrap().push((*peer, channel, encrypted));
            Ok(())
        }

        async fn send(&mut self, peer: &PeerAddress, payload: &[u8]) -> io::Result<CompletionRx> {
            if let Some(kind) = *self.send_error.lock().unwrap() {
                return Err(io::Error::new(kind, "mock send error"));
            }
            self.sent_payloads.lock().unwrap().push((*peer, payload.to_vec()));

            let (tx, rx) = oneshot::channel();
            match *self.behavior.lock().unwrap() {
                CompletionBehavior::After(delay, status) => {
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let _ = tx.send(status);
                    });
                }
                CompletionBehavior::Never => {
                    self.parked_senders.lock().unwrap().push(tx);
                }
                CompletionBehavior::DropSender => {
                    drop(tx);
                }
            }
            Ok(rx)
        }

        async fn deinit(&mut self) {
            *self.deinit_count.lock().unwrap() += 1;
        }
    }
}
