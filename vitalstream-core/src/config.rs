//! Deployment environment and endpoint configuration
//!
//! The analytics service is deployed in three environments with different
//! base URLs for its HTTP and WebSocket surfaces. `ClientConfig` selects a
//! pair of base URLs from an [`Environment`] and allows explicit overrides
//! for tests and on-prem deployments.
//!
//! The streaming endpoint is `<ws base>/ws/<user id>`; whether the scheme is
//! `ws` or `wss` is entirely a property of the configured base URL.

use serde::Deserialize;

/// Deployment environment selecting default base URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development against a service on localhost
    #[serde(alias = "dev")]
    Development,
    /// Shared staging deployment
    Staging,
    /// Production deployment
    #[serde(alias = "prod")]
    Production,
}

impl Environment {
    /// Default HTTP base URL for this environment
    pub fn api_url(&self) -> &'static str {
        match self {
            Environment::Development => "http://localhost:8000",
            Environment::Staging => "https://staging-api.vitalstream.dev",
            Environment::Production => "https://api.vitalstream.dev",
        }
    }

    /// Default WebSocket base URL for this environment
    pub fn ws_url(&self) -> &'static str {
        match self {
            Environment::Development => "ws://localhost:8000",
            Environment::Staging => "wss://staging-api.vitalstream.dev",
            Environment::Production => "wss://api.vitalstream.dev",
        }
    }
}

/// Resolved endpoint configuration for a client instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL for REST calls
    pub api_url: String,
    /// Base URL for the event stream
    pub ws_url: String,
}

impl ClientConfig {
    /// Configuration for a deployment environment
    pub fn for_environment(env: Environment) -> Self {
        Self {
            api_url: env.api_url().to_string(),
            ws_url: env.ws_url().to_string(),
        }
    }

    /// Override the REST base URL
    ///
    /// The override takes precedence over the environment default.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the WebSocket base URL
    pub fn with_ws_url(mut self, url: impl Into<String>) -> Self {
        self.ws_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the streaming endpoint for a user/session identifier
    pub fn stream_url(&self, user_id: &str) -> String {
        format!("{}/ws/{}", self.ws_url.trim_end_matches('/'), user_id)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_environment(Environment::Development)
    }
}
