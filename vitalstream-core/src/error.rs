//! Error types for vitalstream
//!
//! This module provides the error handling surface shared by the core and
//! client crates. A single `Error` enum covers every failure mode the SDK
//! can encounter, from WebSocket transport problems to REST call failures.
//!
//! # Error Philosophy
//!
//! The streaming client deliberately keeps most failures out of caller-facing
//! signatures: a dropped send or a malformed inbound frame is logged and
//! absorbed, because dashboard code must not crash on a transient disconnect.
//! `Error` therefore mostly appears on the REST surface and in the codec,
//! where callers genuinely need to branch on failure.

use thiserror::Error;

/// Result type for vitalstream operations
///
/// Convenience alias used throughout the vitalstream crates for consistent
/// error handling.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for vitalstream operations
///
/// # Error Categories
///
/// - **Transport errors**: WebSocket, ConnectionClosed
/// - **Codec errors**: Decode, Serialization
/// - **REST errors**: Http, Api
/// - **Configuration errors**: Config
#[derive(Debug, Error)]
pub enum Error {
    /// WebSocket transport layer error
    ///
    /// Covers handshake failures, protocol violations, or frame processing
    /// errors below the event layer.
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Inbound frame could not be decoded as an event
    ///
    /// The payload was not a well-formed `{"type": ..., "data": ...}` object.
    /// The streaming client reports this and drops the frame; the connection
    /// itself is unaffected.
    #[error("Event decode error: {0}")]
    Decode(String),

    /// Serialization error when encoding an outbound event or request body
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Connection is no longer active
    ///
    /// Further streaming operations will be dropped until the client
    /// reconnects or `connect()` is called again.
    #[error("Connection closed")]
    ConnectionClosed,

    /// HTTP transport error from the REST client
    #[error("HTTP error: {0}")]
    Http(String),

    /// REST endpoint returned a non-success status
    #[error("API error: status {status}: {message}")]
    Api {
        /// HTTP status code returned by the service
        status: u16,
        /// Response body or status text
        message: String,
    },

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(e.to_string())
    }
}
