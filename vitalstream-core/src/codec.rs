//! Codec for stream event serialization and deserialization
//!
//! Wraps serde with the error mapping the rest of the SDK expects:
//! encoding problems become `Error::Serialization`, inbound parse problems
//! become `Error::Decode`. The streaming client treats a decode failure as a
//! reportable, droppable condition that never disturbs the connection.

use crate::error::{Error, Result};
use crate::event::{StreamEvent, WireEvent};

/// Encode a wire event to its JSON text form
pub fn encode_event(event: &WireEvent) -> Result<String> {
    serde_json::to_string(event).map_err(|e| Error::Serialization(e.to_string()))
}

/// Encode a typed stream event to its JSON text form
pub fn encode_stream_event(event: &StreamEvent) -> Result<String> {
    serde_json::to_string(event).map_err(|e| Error::Serialization(e.to_string()))
}

/// Decode an inbound text frame as a wire event
///
/// Fails with `Error::Decode` when the frame is not valid JSON or is missing
/// the `type`/`data` envelope.
pub fn decode_event(text: &str) -> Result<WireEvent> {
    serde_json::from_str(text).map_err(|e| Error::Decode(e.to_string()))
}

/// Decode an inbound text frame directly as a typed stream event
///
/// Fails for unknown topics; use [`decode_event`] when arbitrary topics must
/// be handled.
pub fn decode_stream_event(text: &str) -> Result<StreamEvent> {
    serde_json::from_str(text).map_err(|e| Error::Decode(e.to_string()))
}
