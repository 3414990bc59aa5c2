//! Stream event types
//!
//! Every frame on the analytics stream, in both directions, is a JSON object
//! of the shape `{ "type": "<topic>", "data": <payload> }`. This module
//! provides two views of that shape:
//!
//! 1. **`WireEvent`**: the raw transport form. The `type` field names a topic
//!    and `data` is an opaque JSON value. The streaming client dispatches on
//!    this form, so subscribers for unknown topics still work.
//! 2. **`StreamEvent`**: a tagged union over the known topics with a typed
//!    payload schema per topic, decoded via a safe parse-or-error step.
//!
//! # Known Topics
//!
//! - `health_update`: live health metrics for the session's user
//! - `concentration_update`: a fresh concentration score
//! - `connection_status`: connectivity changes, emitted both by the server
//!   on accept and locally by the client on every state transition

use serde::{Deserialize, Serialize};

/// Topic name for health metric events
pub const TOPIC_HEALTH_UPDATE: &str = "health_update";
/// Topic name for concentration score events
pub const TOPIC_CONCENTRATION_UPDATE: &str = "concentration_update";
/// Topic name for connectivity change events
pub const TOPIC_CONNECTION_STATUS: &str = "connection_status";

/// Raw event as it appears on the wire
///
/// The payload is kept as an opaque `serde_json::Value` because topic
/// payloads are defined by the collaborators that subscribe to them. Use
/// [`StreamEvent`] to decode the known topics into typed payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WireEvent {
    /// Topic name used for subscription and dispatch
    #[serde(rename = "type")]
    pub event_type: String,
    /// Opaque structured payload
    pub data: serde_json::Value,
}

impl WireEvent {
    /// Create a wire event from a topic name and an already-encoded payload
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// Create a wire event by serializing a typed payload
    ///
    /// Returns `Err` if the payload cannot be represented as JSON.
    pub fn from_payload<T: Serialize>(
        event_type: impl Into<String>,
        payload: &T,
    ) -> crate::Result<Self> {
        let data = serde_json::to_value(payload)
            .map_err(|e| crate::Error::Serialization(e.to_string()))?;
        Ok(Self::new(event_type, data))
    }
}

/// Typed view over the known stream topics
///
/// Decoding uses the `type` field as the tag and `data` as the content, so a
/// `StreamEvent` round-trips through the exact wire shape. Unknown topics and
/// malformed payloads fail to decode; callers that need to handle arbitrary
/// topics should work with [`WireEvent`] instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum StreamEvent {
    /// Live health metrics push
    #[serde(rename = "health_update")]
    HealthUpdate(HealthMetrics),
    /// Fresh concentration analysis result
    #[serde(rename = "concentration_update")]
    ConcentrationUpdate(ConcentrationUpdate),
    /// Connectivity change, server-sent or synthesized locally
    #[serde(rename = "connection_status")]
    ConnectionStatus(ConnectionStatus),
}

impl StreamEvent {
    /// Topic name this event dispatches under
    pub fn topic(&self) -> &'static str {
        match self {
            StreamEvent::HealthUpdate(_) => TOPIC_HEALTH_UPDATE,
            StreamEvent::ConcentrationUpdate(_) => TOPIC_CONCENTRATION_UPDATE,
            StreamEvent::ConnectionStatus(_) => TOPIC_CONNECTION_STATUS,
        }
    }
}

impl TryFrom<&WireEvent> for StreamEvent {
    type Error = crate::Error;

    fn try_from(event: &WireEvent) -> crate::Result<Self> {
        let value = serde_json::json!({
            "type": event.event_type,
            "data": event.data,
        });
        serde_json::from_value(value).map_err(|e| crate::Error::Decode(e.to_string()))
    }
}

/// Health metrics payload for `health_update`
///
/// Fields beyond the core set are preserved verbatim in `extra` so the
/// client stays forward-compatible with new metrics from the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthMetrics {
    /// Current heart rate in BPM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    /// Step count for the day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<u64>,
    /// Hours slept the previous night
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
    /// Stress indicator on the service's 0-10 scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress_level: Option<f64>,
    /// Additional metrics not modelled here
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Concentration score payload for `concentration_update`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConcentrationUpdate {
    /// Concentration score on a 0-100 scale
    pub concentration_score: f64,
    /// Model confidence in the score, 0-1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Additional analysis fields
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Connectivity payload for `connection_status`
///
/// Emitted by the server when a session is accepted and by the streaming
/// client on every local state transition, so UI layers can render
/// connectivity (including retry exhaustion) without exceptions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionStatus {
    /// Whether the transport is currently usable
    pub connected: bool,
    /// Lifecycle detail: "connecting", "connected", "reconnecting" or
    /// "disconnected"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Reconnect attempt number, present while reconnecting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt: Option<u32>,
}

impl ConnectionStatus {
    /// Status emitted when a transport open is in progress
    pub fn connecting() -> Self {
        Self {
            connected: false,
            status: Some("connecting".to_string()),
            attempt: None,
        }
    }

    /// Status emitted on a successful handshake
    pub fn connected() -> Self {
        Self {
            connected: true,
            status: Some("connected".to_string()),
            attempt: None,
        }
    }

    /// Status emitted while waiting out the retry delay
    pub fn reconnecting(attempt: u32) -> Self {
        Self {
            connected: false,
            status: Some("reconnecting".to_string()),
            attempt: Some(attempt),
        }
    }

    /// Status emitted on explicit disconnect or retry exhaustion
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            status: Some("disconnected".to_string()),
            attempt: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_event_roundtrip() {
        let event = WireEvent::new("health_update", json!({"heart_rate": 72}));
        let encoded = serde_json::to_string(&event).unwrap();

        assert!(encoded.contains("\"type\":\"health_update\""));
        assert!(encoded.contains("\"data\""));

        let decoded: WireEvent = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn test_stream_event_decodes_health_update() {
        let wire = WireEvent::new("health_update", json!({"heart_rate": 72.0, "steps": 4200}));
        let event = StreamEvent::try_from(&wire).unwrap();

        match event {
            StreamEvent::HealthUpdate(metrics) => {
                assert_eq!(metrics.heart_rate, Some(72.0));
                assert_eq!(metrics.steps, Some(4200));
                assert!(metrics.sleep_hours.is_none());
            }
            other => panic!("Expected HealthUpdate, got {:?}", other),
        }
    }

    #[test]
    fn test_stream_event_decodes_concentration_update() {
        let wire = WireEvent::new(
            "concentration_update",
            json!({"concentration_score": 80.0, "confidence": 0.8}),
        );
        let event = StreamEvent::try_from(&wire).unwrap();

        assert_eq!(event.topic(), TOPIC_CONCENTRATION_UPDATE);
        match event {
            StreamEvent::ConcentrationUpdate(update) => {
                assert_eq!(update.concentration_score, 80.0);
                assert_eq!(update.confidence, Some(0.8));
            }
            other => panic!("Expected ConcentrationUpdate, got {:?}", other),
        }
    }

    #[test]
    fn test_stream_event_rejects_unknown_topic() {
        let wire = WireEvent::new("unknown_topic", json!({"some": "payload"}));
        assert!(StreamEvent::try_from(&wire).is_err());
    }

    #[test]
    fn test_stream_event_rejects_malformed_payload() {
        // concentration_score is required for this topic
        let wire = WireEvent::new("concentration_update", json!({"wrong_field": 1}));
        assert!(StreamEvent::try_from(&wire).is_err());
    }

    #[test]
    fn test_stream_event_wire_shape() {
        let event = StreamEvent::ConcentrationUpdate(ConcentrationUpdate {
            concentration_score: 80.0,
            confidence: None,
            extra: Default::default(),
        });
        let encoded = serde_json::to_string(&event).unwrap();

        assert_eq!(
            encoded,
            r#"{"type":"concentration_update","data":{"concentration_score":80.0}}"#
        );
    }

    #[test]
    fn test_health_metrics_preserves_extra_fields() {
        let wire = WireEvent::new(
            "health_update",
            json!({"heart_rate": 60.0, "active_calories": 300}),
        );
        let event = StreamEvent::try_from(&wire).unwrap();

        match event {
            StreamEvent::HealthUpdate(metrics) => {
                assert_eq!(metrics.extra.get("active_calories"), Some(&json!(300)));
            }
            other => panic!("Expected HealthUpdate, got {:?}", other),
        }
    }

    #[test]
    fn test_connection_status_constructors() {
        assert!(ConnectionStatus::connected().connected);
        assert!(!ConnectionStatus::disconnected().connected);

        let retrying = ConnectionStatus::reconnecting(3);
        assert_eq!(retrying.attempt, Some(3));
        assert_eq!(retrying.status.as_deref(), Some("reconnecting"));
    }
}
