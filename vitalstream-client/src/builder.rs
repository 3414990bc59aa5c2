//! Builder for configuring a stream client
//!
//! The builder binds a client to a user/session identifier, resolves the
//! streaming endpoint from the deployment configuration and selects the
//! retry policy. Building does not connect; call
//! [`StreamClient::connect`](crate::StreamClient::connect) explicitly.
//!
//! # Examples
//!
//! ```rust,no_run
//! use vitalstream_client::{StreamClientBuilder, FixedDelay};
//! use vitalstream_core::Environment;
//! use std::time::Duration;
//!
//! # async fn example() {
//! let client = StreamClientBuilder::new("user-42")
//!     .environment(Environment::Staging)
//!     .retry_policy(Box::new(FixedDelay::new(Duration::from_secs(1)).with_max_attempts(3)))
//!     .build();
//! client.connect().await;
//! # }
//! ```

use crate::connection_state::ConnectionManager;
use crate::retry::{FixedDelay, RetryPolicy};
use crate::StreamClient;
use vitalstream_core::{ClientConfig, Environment};

/// Builder for [`StreamClient`]
pub struct StreamClientBuilder {
    user_id: String,
    config: ClientConfig,
    retry_policy: Option<Box<dyn RetryPolicy>>,
}

impl StreamClientBuilder {
    /// Create a builder bound to a user/session identifier
    ///
    /// Defaults to the development environment and the fixed-delay retry
    /// policy (3 s between attempts, 5 attempts).
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            config: ClientConfig::default(),
            retry_policy: None,
        }
    }

    /// Use the base URLs of a deployment environment
    pub fn environment(mut self, env: Environment) -> Self {
        self.config = ClientConfig::for_environment(env);
        self
    }

    /// Use an explicit endpoint configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the WebSocket base URL
    pub fn ws_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.with_ws_url(url);
        self
    }

    /// Select the retry policy used after unexpected connection loss
    pub fn retry_policy(mut self, policy: Box<dyn RetryPolicy>) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Build the client
    pub fn build(self) -> StreamClient {
        let policy = self
            .retry_policy
            .unwrap_or_else(|| Box::new(FixedDelay::default()));
        let url = self.config.stream_url(&self.user_id);
        StreamClient::from_parts(url, ConnectionManager::new(policy))
    }
}
