//! Consumer registry
//!
//! The set of consumer queues a broadcast delivers to. All mutation goes
//! through one lock; broadcasts iterate over snapshots so that concurrent
//! register/unregister calls never disturb an in-flight delivery loop.

use tokio::sync::{mpsc, RwLock};

use super::consumer::{Consumer, ConsumerId};

/// Registry-side handle to one consumer queue
pub(crate) struct ConsumerSlot<T> {
    pub(crate) id: ConsumerId,
    pub(crate) tx: mpsc::Sender<T>,
}

impl<T> Clone for ConsumerSlot<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            tx: self.tx.clone(),
        }
    }
}

/// Lock-protected list of registered consumer queues
pub(crate) struct ConsumerRegistry<T> {
    slots: RwLock<Vec<ConsumerSlot<T>>>,
    capacity: usize,
}

impl<T> ConsumerRegistry<T> {
    /// Create an empty registry whose queues hold `capacity` values
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            slots: RwLock::new(Vec::new()),
            capacity,
        }
    }

    /// Create a new consumer queue and add its write side
    pub(crate) async fn register(&self) -> Consumer<T> {
        let (tx, rx) = mpsc::channel(self.capacity);
        let id = ConsumerId::next();

        let mut slots = self.slots.write().await;
        slots.push(ConsumerSlot { id, tx });

        tracing::debug!(consumer = %id, consumers = slots.len(), "Consumer registered");

        Consumer::new(id, rx)
    }

    /// Remove the queue with identity `id`
    ///
    /// Returns `false` if no such queue is registered.
    pub(crate) async fn unregister(&self, id: ConsumerId) -> bool {
        let mut slots = self.slots.write().await;

        match slots.iter().position(|slot| slot.id == id) {
            Some(index) => {
                slots.remove(index);
                tracing::debug!(consumer = %id, consumers = slots.len(), "Consumer unregistered");
                true
            }
            None => false,
        }
    }

    /// Point-in-time copy of the member list
    pub(crate) async fn snapshot(&self) -> Vec<ConsumerSlot<T>> {
        self.slots.read().await.clone()
    }

    /// Number of registered consumers
    pub(crate) async fn len(&self) -> usize {
        self.slots.read().await.len()
    }
}
