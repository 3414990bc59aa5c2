//! REST client for the analytics service
//!
//! Stateless wrappers around the service's request/response endpoints.
//! Dashboards call these once to seed initial state, then rely on the event
//! stream for live updates; nothing here touches the streaming connection.
//!
//! Responses for profile/analysis endpoints are collaborator-defined, so
//! they are returned as raw JSON values; the prediction endpoint returns the
//! same payload shape as `concentration_update` stream events and is decoded
//! into the typed form.

use serde::Serialize;
use std::time::Duration;
use vitalstream_core::{ClientConfig, ConcentrationUpdate, Error, Result};

/// Default per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the analytics REST endpoints
#[derive(Clone)]
pub struct HealthApi {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HealthApi {
    /// Create a REST client from an endpoint configuration
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_base_url(config.api_url.clone())
    }

    /// Create a REST client against an explicit base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: None,
        }
    }

    /// Attach a bearer token sent with every request
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Fetch a user's profile
    pub async fn user_profile(&self, user_id: &str) -> Result<serde_json::Value> {
        self.get(&format!("/api/user/{}/profile", user_id), &[])
            .await
    }

    /// Fetch a user's recently stored health metrics
    pub async fn health_metrics(&self, user_id: &str) -> Result<serde_json::Value> {
        self.get(&format!("/api/health-metrics/{}", user_id), &[])
            .await
    }

    /// Fetch a user's concentration analysis
    pub async fn concentration_analysis(&self, user_id: &str) -> Result<serde_json::Value> {
        self.get(&format!("/api/user/{}/concentration-analysis", user_id), &[])
            .await
    }

    /// Fetch a user's focus pattern over a date range
    ///
    /// Dates are `YYYY-MM-DD` strings; either bound may be omitted.
    pub async fn focus_pattern(
        &self,
        user_id: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<serde_json::Value> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(start) = start_date {
            query.push(("start_date", start));
        }
        if let Some(end) = end_date {
            query.push(("end_date", end));
        }
        self.get(&format!("/api/user/{}/focus-pattern", user_id), &query)
            .await
    }

    /// Store a batch of health metrics
    pub async fn store_health_metrics<T: Serialize>(
        &self,
        metrics: &T,
    ) -> Result<serde_json::Value> {
        self.post("/api/health-metrics", metrics).await
    }

    /// Request a concentration prediction for a set of health metrics
    pub async fn predict_concentration<T: Serialize>(
        &self,
        metrics: &T,
    ) -> Result<ConcentrationUpdate> {
        let value = self.post("/predict/concentration", metrics).await?;
        serde_json::from_value(value).map_err(|e| Error::Decode(e.to_string()))
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<serde_json::Value> {
        let mut request = self.http.get(format!("{}{}", self.base_url, path));
        if !query.is_empty() {
            request = request.query(query);
        }
        self.execute(request).await
    }

    async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<serde_json::Value> {
        let request = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body);
        self.execute(request).await
    }

    async fn execute(&self, mut request: reqwest::RequestBuilder) -> Result<serde_json::Value> {
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| Error::Decode(e.to_string()))
    }
}
