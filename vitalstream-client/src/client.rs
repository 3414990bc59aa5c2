//! Reconnecting event stream client
//!
//! `StreamClient` maintains one logical WebSocket connection to the analytics
//! service, identified by a user/session id, and fans inbound typed events
//! out to topic subscribers. When the transport drops unexpectedly the client
//! re-establishes it on a constant cadence until the retry budget runs out.
//!
//! # Client Lifecycle
//!
//! 1. **Build**: construct via [`crate::StreamClientBuilder`], bound to a
//!    user id
//! 2. **Connect**: `connect()` opens the transport; idempotent
//! 3. **Use**: `subscribe`/`unsubscribe` topics, `send` events
//! 4. **Disconnect**: `disconnect()` tears down the transport and cancels
//!    any pending retry
//!
//! # Cloning
//!
//! `StreamClient` is cheaply cloneable using `Arc` internally. All clones
//! share the same connection, registry and state, so the client can be
//! handed to several dashboard components.
//!
//! # Failure Surface
//!
//! None of the streaming operations return errors: decode failures, dropped
//! sends and retry exhaustion are reported through `tracing` and through the
//! synthetic `connection_status` topic. Dashboard code observes connectivity
//! by subscribing to that topic.

use crate::connection_state::{ConnectionManager, ConnectionState};
use crate::subscription::{EventCallback, TopicRegistry};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use vitalstream_core::{
    codec, ConcentrationUpdate, ConnectionStatus, HealthMetrics, WireEvent,
    TOPIC_CONCENTRATION_UPDATE, TOPIC_CONNECTION_STATUS, TOPIC_HEALTH_UPDATE,
};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>, Message>;
type WsStream = SplitStream<WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>>;

/// Event stream client with automatic reconnection
#[derive(Clone)]
pub struct StreamClient {
    /// Streaming endpoint, `ws(s)://<host>/ws/<user id>`
    url: String,
    /// Topic subscriber registry shared with the worker
    registry: TopicRegistry,
    /// Lifecycle state and retry policy
    conn: Arc<ConnectionManager>,
    /// Write half of the active transport, if any
    sender: Arc<Mutex<Option<WsSink>>>,
    /// Connection worker owning the read half and the retry timer
    worker: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl StreamClient {
    pub(crate) fn from_parts(url: String, conn: ConnectionManager) -> Self {
        Self {
            url,
            registry: TopicRegistry::new(),
            conn: Arc::new(conn),
            sender: Arc::new(Mutex::new(None)),
            worker: Arc::new(Mutex::new(None)),
        }
    }

    /// Streaming endpoint this client connects to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Current connection state
    pub async fn state(&self) -> ConnectionState {
        self.conn.state().await
    }

    /// Whether the transport is currently open
    pub async fn is_connected(&self) -> bool {
        self.conn.state().await.is_open()
    }

    /// Open the stream transport
    ///
    /// Idempotent: a no-op while a handshake is in progress or the transport
    /// is already open, so repeated calls never open a duplicate connection.
    /// From `Idle`, `Retrying` or `Closed` this cancels any parked retry,
    /// clears the retry budget and opens a fresh transport.
    pub async fn connect(&self) {
        match self.conn.state().await {
            ConnectionState::Connecting | ConnectionState::Open => {
                tracing::debug!(url = %self.url, "connect ignored, transport already active");
                return;
            }
            _ => {}
        }

        if let Some(handle) = self.worker.lock().await.take() {
            handle.abort();
        }

        self.conn.reset_attempts().await;
        self.conn.connecting().await;
        emit_status(&self.registry, ConnectionStatus::connecting()).await;

        tracing::info!(url = %self.url, "connecting to event stream");
        let worker = tokio::spawn(run_connection(
            self.url.clone(),
            self.registry.clone(),
            Arc::clone(&self.conn),
            Arc::clone(&self.sender),
        ));
        *self.worker.lock().await = Some(worker);
    }

    /// Close the stream transport and stop reconnecting
    ///
    /// Cancels a pending retry synchronously: once this returns, no
    /// transport open happens without a new `connect()`. Safe to call when
    /// already closed.
    pub async fn disconnect(&self) {
        if let Some(handle) = self.worker.lock().await.take() {
            handle.abort();
        }

        let was_closed = matches!(self.conn.state().await, ConnectionState::Closed);
        self.conn.closed().await;
        self.conn.reset_attempts().await;

        if let Some(mut sink) = self.sender.lock().await.take() {
            if let Err(e) = sink.send(Message::Close(None)).await {
                tracing::debug!(error = %e, "close frame not delivered");
            }
        }

        if !was_closed {
            tracing::info!(url = %self.url, "stream disconnected");
            emit_status(&self.registry, ConnectionStatus::disconnected()).await;
        }
    }

    /// Register a callback for a topic
    ///
    /// Multiple independent callbacks per topic are supported; registering
    /// the same [`EventCallback`] handle twice is a no-op.
    pub async fn subscribe(&self, topic: impl Into<String>, callback: &EventCallback) {
        self.registry.add(topic, callback).await;
    }

    /// Remove a callback from a topic; no-op if it was never registered
    pub async fn unsubscribe(&self, topic: &str, callback: &EventCallback) {
        self.registry.remove(topic, callback).await;
    }

    /// Send an event to the server
    ///
    /// Serializes `{"type": topic, "data": payload}` and transmits it only
    /// while the connection is open. Outside the open state, or on any
    /// serialization or transport failure, the event is logged and dropped;
    /// this method never surfaces an error to the caller.
    pub async fn send<T: Serialize>(&self, topic: &str, payload: T) {
        let event = match WireEvent::from_payload(topic, &payload) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(topic, error = %e, "dropping unserializable event");
                return;
            }
        };

        if !self.conn.state().await.is_open() {
            tracing::debug!(topic, "dropping send while not connected");
            return;
        }

        let frame = match codec::encode_event(&event) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(topic, error = %e, "dropping unencodable event");
                return;
            }
        };

        let mut sender = self.sender.lock().await;
        match sender.as_mut() {
            Some(sink) => {
                if let Err(e) = sink.send(Message::Text(frame)).await {
                    tracing::warn!(topic, error = %e, "send failed, event dropped");
                }
            }
            None => tracing::debug!(topic, "dropping send, no active transport"),
        }
    }

    /// Send a `health_update` event
    pub async fn send_health_update(&self, metrics: &HealthMetrics) {
        self.send(TOPIC_HEALTH_UPDATE, metrics).await;
    }

    /// Send a `concentration_update` event
    pub async fn send_concentration_update(&self, update: &ConcentrationUpdate) {
        self.send(TOPIC_CONCENTRATION_UPDATE, update).await;
    }
}

/// Dispatch a locally synthesized `connection_status` event
async fn emit_status(registry: &TopicRegistry, status: ConnectionStatus) {
    match WireEvent::from_payload(TOPIC_CONNECTION_STATUS, &status) {
        Ok(event) => registry.dispatch(event).await,
        Err(e) => tracing::warn!(error = %e, "failed to encode connection status"),
    }
}

/// Connection worker: owns the read half and the retry timer
///
/// Runs until the retry budget is exhausted or the task is aborted by
/// `disconnect()`/`connect()`. A failed handshake takes the same retry path
/// as an unexpected closure.
async fn run_connection(
    url: String,
    registry: TopicRegistry,
    conn: Arc<ConnectionManager>,
    sender: Arc<Mutex<Option<WsSink>>>,
) {
    loop {
        match connect_async(&url).await {
            Ok((ws_stream, _)) => {
                tracing::info!(url = %url, "event stream connected");
                let (sink, stream) = ws_stream.split();
                *sender.lock().await = Some(sink);
                conn.opened().await;
                emit_status(&registry, ConnectionStatus::connected()).await;

                read_until_closed(stream, &registry).await;
                sender.lock().await.take();
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "stream handshake failed");
            }
        }

        match conn.next_retry_delay().await {
            Some(delay) => {
                let attempt = conn.attempt().await;
                tracing::info!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "scheduling reconnect"
                );
                emit_status(&registry, ConnectionStatus::reconnecting(attempt)).await;
                tokio::time::sleep(delay).await;
                conn.connecting().await;
                emit_status(&registry, ConnectionStatus::connecting()).await;
            }
            None => {
                tracing::error!(url = %url, "reconnect attempts exhausted");
                emit_status(&registry, ConnectionStatus::disconnected()).await;
                return;
            }
        }
    }
}

/// Process inbound frames until the transport closes
///
/// A frame that fails to decode is reported and dropped without disturbing
/// the connection. A transport error is logged; the loop then exits and the
/// closure drives the state transition.
async fn read_until_closed(mut stream: WsStream, registry: &TopicRegistry) {
    while let Some(message) = stream.next().await {
        match message {
            Ok(Message::Text(text)) => match codec::decode_event(&text) {
                Ok(event) => registry.dispatch(event).await,
                Err(e) => {
                    tracing::warn!(error = %e, "dropping undecodable frame");
                }
            },
            Ok(Message::Close(_)) => {
                tracing::info!("connection closed by server");
                break;
            }
            Ok(_) => {} // Ignore binary/ping/pong frames
            Err(e) => {
                tracing::error!(error = %e, "websocket error");
                break;
            }
        }
    }
}
