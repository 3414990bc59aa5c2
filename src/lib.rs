//! VITALSTREAM - real-time health and concentration analytics client
//!
//! This is the main convenience crate that re-exports the vitalstream
//! sub-crates. Use this crate if you want a single dependency for both the
//! event stream and the REST surface.
//!
//! # Architecture
//!
//! vitalstream is organized into modular crates:
//!
//! - **vitalstream-core**: event types, codec, errors, configuration
//! - **vitalstream-client**: reconnecting WebSocket stream client and REST
//!   client
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use vitalstream::{EventCallback, StreamClientBuilder};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = StreamClientBuilder::new("user-42").build();
//!
//!     let on_update = EventCallback::new(|event| async move {
//!         println!("{}: {}", event.event_type, event.data);
//!     });
//!     client.subscribe("health_update", &on_update).await;
//!     client.connect().await;
//! }
//! ```

// Re-export all public APIs from sub-crates
// This allows users to access everything through `vitalstream::` prefix
pub use vitalstream_client as client;
pub use vitalstream_core as core;

// Convenience re-exports of the most commonly used types
pub use vitalstream_client::{
    EventCallback, FixedDelay, HealthApi, StreamClient, StreamClientBuilder,
};
pub use vitalstream_core::{ClientConfig, Environment, StreamEvent, WireEvent};
