//! Core event types, codec and configuration for vitalstream
//!
//! This crate provides the foundation shared by the vitalstream client:
//!
//! - **Events**: the `{type, data}` wire envelope and a typed tagged union
//!   over the known stream topics
//! - **Codec**: serialization and deserialization of stream events
//! - **Error handling**: error types for transport, codec and REST failures
//! - **Configuration**: per-environment endpoint selection
//!
//! The crate is transport-agnostic; `vitalstream-client` builds the
//! WebSocket and REST transports on top of it.
//!
//! # Example
//!
//! ```rust
//! use vitalstream_core::{codec, StreamEvent};
//!
//! let frame = r#"{"type":"health_update","data":{"heart_rate":72}}"#;
//! let event = codec::decode_stream_event(frame).unwrap();
//! assert_eq!(event.topic(), "health_update");
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod event;

// Re-export the most commonly used types for convenience
pub use config::{ClientConfig, Environment};
pub use error::{Error, Result};
pub use event::{
    ConcentrationUpdate, ConnectionStatus, HealthMetrics, StreamEvent, WireEvent,
    TOPIC_CONCENTRATION_UPDATE, TOPIC_CONNECTION_STATUS, TOPIC_HEALTH_UPDATE,
};
