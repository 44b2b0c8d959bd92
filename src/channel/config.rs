//! Channel configuration

use std::time::Duration;

/// Settings bound to a [`BroadcastChannel`] at construction
///
/// [`BroadcastChannel`]: super::BroadcastChannel
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Capacity of every consumer queue and producer intake queue
    ///
    /// `0` requests an unbuffered queue, but is served by a single slot: a
    /// consumer that is not currently waiting in `recv` still accepts one
    /// value, and is only evicted when a second value finds that slot taken.
    pub size: usize,

    /// How long a delivery may wait for queue space (zero = never wait)
    pub timeout: Duration,

    /// Replay each batch to consumers that register during its delivery window
    pub resend: bool,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            size: 0,
            timeout: Duration::ZERO,
            resend: false,
        }
    }
}

impl ChannelConfig {
    /// Set the queue capacity (`0` is served by a single slot, see the `size` field)
    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Set the delivery timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable catch-up delivery for late joiners
    pub fn resend(mut self) -> Self {
        self.resend = true;
        self
    }

    /// Disable catch-up delivery
    pub fn disable_resend(mut self) -> Self {
        self.resend = false;
        self
    }

    /// Capacity handed to the underlying bounded queues.
    ///
    /// Bounded tokio queues need at least one slot, so an unbuffered
    /// configuration is served by a single-slot queue.
    pub(crate) fn queue_capacity(&self) -> usize {
        self.size.max(1)
    }

    /// Whether deliveries are best-effort only
    pub fn is_non_blocking(&self) -> bool {
        self.timeout.is_zero()
    }
}
