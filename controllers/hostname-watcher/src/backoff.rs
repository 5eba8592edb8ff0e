//! # Exponential Backoff
//!
//! Delays between attempts to re-establish the Ingress watch.
//! Each delay doubles the previous one, starting at the minimum and capped
//! at the maximum. A successful reconnect resets the sequence.

use std::time::Duration;

/// Exponential backoff calculator
///
/// Calculations are performed in milliseconds.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    /// Minimum backoff value in milliseconds (for reset)
    min_ms: u64,
    /// Current backoff value in milliseconds
    current_ms: u64,
    /// Maximum backoff value in milliseconds
    max_ms: u64,
}

impl ExponentialBackoff {
    /// Create a new exponential backoff with specified minimum and maximum values in milliseconds
    ///
    /// Default sequence for watch recovery: 500ms, 1s, 2s, 4s, ... 30s (max)
    #[must_use]
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        let max_ms = max_ms.max(min_ms);
        Self {
            min_ms,
            current_ms: min_ms,
            max_ms,
        }
    }

    /// Get the next backoff duration in milliseconds and advance the sequence
    pub fn next_backoff_ms(&mut self) -> u64 {
        let result_ms = self.current_ms;
        self.current_ms = std::cmp::min(self.current_ms.saturating_mul(2), self.max_ms);
        result_ms
    }

    /// Get the next backoff duration as a `Duration` and advance the sequence
    pub fn next_backoff(&mut self) -> Duration {
        Duration::from_millis(self.next_backoff_ms())
    }

    /// Reset the backoff to the initial state
    pub fn reset(&mut self) {
        self.current_ms = self.min_ms;
    }
}
