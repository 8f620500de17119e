//! # Error Types
//!
//! Custom error types for Soil Node using `thiserror`.
//!
//! Every error is terminal for the current measurement cycle but never fatal
//! for the process: the cycle controller logs the failure and still reaches
//! the sleep step, so the node always tries again on the next wake.

use thiserror::Error;

/// Main error type for Soil Node
#[derive(Debug, Error)]
pub enum NodeError {
    /// The connectionless-messaging subsystem failed to initialize
    #[error("messaging subsystem init failed: {0}")]
    SubsystemInitFailed(String),

    /// The configured peer could not be registered with the radio
    #[error("peer registration failed: {0}")]
    PeerRegistrationFailed(String),

    /// A peer address string did not parse as a 6-byte hardware address
    #[error("invalid peer address: {0}")]
    InvalidPeerAddress(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Soil Node
pub type Result<T> = std::result::Result<T, NodeError>;
