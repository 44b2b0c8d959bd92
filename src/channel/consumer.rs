//! Consumer handles
//!
//! Each registered consumer owns the read side of its own bounded queue and
//! drains it at its own pace. The write side lives in the registry.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;

pub use tokio::sync::mpsc::error::TryRecvError;

static NEXT_CONSUMER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a registered consumer queue
///
/// Unique for the lifetime of the process, so identities are never reused
/// across channels or after unregistration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConsumerId(u64);

impl ConsumerId {
    pub(super) fn next() -> Self {
        Self(NEXT_CONSUMER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ConsumerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "consumer-{}", self.0)
    }
}

/// Read handle for one consumer queue
///
/// Not `Clone`: a queue has exactly one reader. Once the consumer is
/// unregistered (explicitly or by eviction) the queue still yields whatever
/// was already delivered, then reports end-of-stream.
#[derive(Debug)]
pub struct Consumer<T> {
    id: ConsumerId,
    rx: mpsc::Receiver<T>,
}

impl<T> Consumer<T> {
    pub(super) fn new(id: ConsumerId, rx: mpsc::Receiver<T>) -> Self {
        Self { id, rx }
    }

    /// Identity used to unregister this consumer
    pub fn id(&self) -> ConsumerId {
        self.id
    }

    /// Wait for the next value
    ///
    /// Returns `None` once the consumer has been unregistered and its queue
    /// is drained.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Take the next value if one is already queued
    pub fn try_recv(&mut self) -> Result<T, TryRecvError> {
        self.rx.try_recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = ConsumerId::next();
        let b = ConsumerId::next();

        assert_ne!(a, b);
        assert!(b > a);
    }

    #[tokio::test]
    async fn test_end_of_stream_after_writer_dropped() {
        let (tx, rx) = mpsc::channel(2);
        let mut consumer = Consumer::new(ConsumerId::next(), rx);

        tx.send(5).await.unwrap();
        drop(tx);

        assert_eq!(consumer.recv().await, Some(5));
        assert_eq!(consumer.recv().await, None);
        assert_eq!(consumer.try_recv(), Err(TryRecvError::Disconnected));
    }
}
