//! Retry policies for automatic reconnection
//!
//! When the stream transport drops unexpectedly, the policy determines how
//! long to wait before the next attempt and when to give up. The analytics
//! service expects clients to retry on a constant cadence, so the shipped
//! policies are a fixed delay with a bounded attempt count and a policy that
//! never retries.
//!
//! # Custom Policies
//!
//! Implement the `RetryPolicy` trait to control the behavior; the streaming
//! client consults the policy after every transport loss until it either
//! reconnects or the policy returns `None`.
//!
//! # Examples
//!
//! ```rust
//! use vitalstream_client::FixedDelay;
//! use std::time::Duration;
//!
//! // Default: 3 seconds between attempts, 5 attempts
//! let default = FixedDelay::default();
//!
//! // Custom: 500ms between attempts, 10 attempts
//! let custom = FixedDelay::new(Duration::from_millis(500)).with_max_attempts(10);
//! ```

use std::time::Duration;

/// Delay between reconnect attempts when none is configured
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(3000);
/// Reconnect attempt limit when none is configured
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Trait for reconnection retry policies
///
/// The policy maintains whatever state it needs across attempts. `reset()`
/// is called after a successful handshake so a later disconnect starts the
/// attempt sequence from scratch.
pub trait RetryPolicy: Send + Sync {
    /// Returns the delay before the next reconnection attempt
    ///
    /// `attempt` is the number of attempts already made since the last
    /// successful connection. Returning `None` abandons reconnection.
    fn next_delay(&mut self, attempt: u32) -> Option<Duration>;

    /// Reset policy state after a successful connection
    fn reset(&mut self);
}

/// Constant-delay retry policy with a bounded attempt count
pub struct FixedDelay {
    delay: Duration,
    max_attempts: u32,
}

impl FixedDelay {
    /// Create a fixed delay policy with the default attempt limit
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Set the maximum number of attempts before giving up
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_DELAY)
    }
}

impl RetryPolicy for FixedDelay {
    fn next_delay(&mut self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_attempts {
            return None;
        }
        Some(self.delay)
    }

    fn reset(&mut self) {
        // No state to reset for a fixed delay
    }
}

/// Retry policy that never reconnects
pub struct NoRetry;

impl RetryPolicy for NoRetry {
    fn next_delay(&mut self, _attempt: u32) -> Option<Duration> {
        None
    }

    fn reset(&mut self) {
        // No state to reset
    }
}
