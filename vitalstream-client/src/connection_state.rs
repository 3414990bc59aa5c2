//! Connection state management
//!
//! Tracks the stream transport lifecycle and coordinates retry attempts when
//! the connection is lost.
//!
//! # Connection States
//!
//! - **Idle**: initial state, never connected
//! - **Connecting**: transport handshake in progress
//! - **Open**: connected and operational
//! - **Retrying**: connection lost, waiting out the retry delay
//! - **Closed**: terminal until the next explicit `connect()` — reached on
//!   explicit disconnect or after the retry policy gives up
//!
//! # State Transitions
//!
//! ```text
//! Idle → Connecting → Open
//!            ↑          ↓
//!            └──── Retrying → Closed
//! ```
//!
//! The retry attempt counter is held by the manager, not the state, so it
//! survives the `Retrying → Connecting` hop of each re-attempt. It resets on
//! a successful handshake and on an explicit `connect()`.
//!
//! A transport-level error while `Open` does not itself transition state;
//! the closure that follows it does.

use crate::retry::RetryPolicy;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Lifecycle state of the stream connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Never connected
    Idle,
    /// Transport handshake in progress
    Connecting,
    /// Connected and operational
    Open,
    /// Connection lost, retry pending
    Retrying {
        /// Attempts made since the connection was lost
        attempt: u32,
    },
    /// Inert until the next explicit connect
    Closed,
}

impl ConnectionState {
    /// Whether outbound sends are currently allowed
    pub fn is_open(&self) -> bool {
        matches!(self, ConnectionState::Open)
    }
}

/// Shared connection state plus the retry policy that drives reconnection
pub struct ConnectionManager {
    state: Arc<RwLock<ConnectionState>>,
    attempts: Arc<RwLock<u32>>,
    policy: Arc<RwLock<Box<dyn RetryPolicy>>>,
}

impl ConnectionManager {
    /// Create a manager in the `Idle` state
    pub fn new(policy: Box<dyn RetryPolicy>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ConnectionState::Idle)),
            attempts: Arc::new(RwLock::new(0)),
            policy: Arc::new(RwLock::new(policy)),
        }
    }

    /// Current connection state
    pub async fn state(&self) -> ConnectionState {
        self.state.read().await.clone()
    }

    /// Set the connection state
    pub async fn set_state(&self, new_state: ConnectionState) {
        *self.state.write().await = new_state;
    }

    /// Transition to `Connecting`
    pub async fn connecting(&self) {
        self.set_state(ConnectionState::Connecting).await;
    }

    /// Transition to `Open`, resetting the retry policy and attempt count
    pub async fn opened(&self) {
        self.set_state(ConnectionState::Open).await;
        *self.attempts.write().await = 0;
        self.policy.write().await.reset();
    }

    /// Transition to `Closed`
    pub async fn closed(&self) {
        self.set_state(ConnectionState::Closed).await;
    }

    /// Clear the retry attempt counter
    ///
    /// Called on explicit `connect()` so a client parked in `Closed` after
    /// exhausting its budget gets a fresh one.
    pub async fn reset_attempts(&self) {
        *self.attempts.write().await = 0;
        self.policy.write().await.reset();
    }

    /// Ask the policy for the next retry delay after a transport loss
    ///
    /// On `Some(delay)` the state becomes `Retrying` and the attempt counter
    /// is incremented; on `None` the state becomes `Closed`. The counter
    /// accumulates across consecutive losses until a handshake succeeds.
    pub async fn next_retry_delay(&self) -> Option<Duration> {
        let attempt = *self.attempts.read().await;
        let delay = self.policy.write().await.next_delay(attempt);

        match delay {
            Some(_) => {
                *self.attempts.write().await = attempt + 1;
                self.set_state(ConnectionState::Retrying {
                    attempt: attempt + 1,
                })
                .await;
            }
            None => {
                self.set_state(ConnectionState::Closed).await;
            }
        }

        delay
    }

    /// Retry attempts made since the last successful connection
    pub async fn attempt(&self) -> u32 {
        *self.attempts.read().await
    }
}
