//! Reconnecting event stream client and REST client for vitalstream
//!
//! This crate provides the client side of the health-and-concentration
//! analytics service:
//!
//! - **Event stream**: a WebSocket client that delivers typed push events to
//!   topic subscribers and recovers automatically from disconnects with a
//!   constant-delay, bounded retry policy
//! - **REST**: stateless wrappers over the service's request/response
//!   endpoints, used to seed initial dashboard state
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use vitalstream_client::{EventCallback, StreamClientBuilder};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = StreamClientBuilder::new("user-42").build();
//!
//!     let on_health = EventCallback::new(|event| async move {
//!         println!("health update: {}", event.data);
//!     });
//!     client.subscribe("health_update", &on_health).await;
//!
//!     client.connect().await;
//!
//!     // ... later
//!     client.unsubscribe("health_update", &on_health).await;
//!     client.disconnect().await;
//! }
//! ```
//!
//! # Observing Connectivity
//!
//! The client pushes a synthetic `connection_status` event through the
//! registry on every state transition, so UI layers learn about reconnects
//! and retry exhaustion the same way they learn about any other topic:
//!
//! ```rust,no_run
//! use vitalstream_client::EventCallback;
//! use vitalstream_core::ConnectionStatus;
//!
//! let on_status = EventCallback::new(|event| async move {
//!     if let Ok(status) = serde_json::from_value::<ConnectionStatus>(event.data) {
//!         println!("connected: {}", status.connected);
//!     }
//! });
//! ```

mod builder;
mod client;
mod connection_state;
mod rest;
mod retry;
mod subscription;

pub use builder::StreamClientBuilder;
pub use client::StreamClient;
pub use connection_state::{ConnectionManager, ConnectionState};
pub use rest::HealthApi;
pub use retry::{FixedDelay, NoRetry, RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY};
pub use subscription::{EventCallback, TopicRegistry};
