//! Cache Entry Module
//!
//! A stored payload together with its sliding expiration window.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single stored payload and its expiration state.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Vec<u8>,
    /// Sliding window, None = no expiration
    pub sliding: Option<Duration>,
    /// Deadline after which the entry is dead, None = no expiration
    pub expires_at: Option<Instant>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry whose deadline starts one full window from now.
    pub fn new(value: Vec<u8>, sliding: Option<Duration>) -> Self {
        let expires_at = sliding.and_then(deadline_after);

        Self {
            value,
            sliding,
            expires_at,
        }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its deadline.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    // == Renew ==
    /// Pushes the deadline out by the full sliding window.
    pub fn renew(&mut self) {
        if let Some(window) = self.sliding {
            self.expires_at = deadline_after(window);
        }
    }
}

/// Deadline one `window` from now. A window reaching past the clock's range
/// never expires.
fn deadline_after(window: Duration) -> Option<Instant> {
    Instant::now().checked_add(window)
}
