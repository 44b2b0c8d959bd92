//! Broadcast engine
//!
//! Fans each batch out to every registered consumer, evicts consumers whose
//! delivery fails, and optionally replays the batch to late joiners.

use std::collections::HashSet;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::stats::metrics::Counters;
use crate::stats::ChannelStats;

use super::config::ChannelConfig;
use super::consumer::{Consumer, ConsumerId};
use super::delivery;
use super::error::DeliveryError;
use super::publisher::{self, Publisher};
use super::registry::{ConsumerRegistry, ConsumerSlot};

/// State shared by every clone of a channel
struct Shared<T> {
    registry: ConsumerRegistry<T>,
    config: ChannelConfig,
    counters: Counters,
    shutdown: CancellationToken,
}

/// Multi-producer, multi-consumer broadcast channel
///
/// Every value passed to [`broadcast`](Self::broadcast) is delivered to each
/// consumer registered at the time of the call. Consumers that cannot accept
/// a value within the configured timeout are evicted; producers never see
/// delivery failures.
///
/// Cloning is cheap and yields another handle to the same channel.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use fanout_channel::{BroadcastChannel, ChannelConfig};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let config = ChannelConfig::default().size(4).timeout(Duration::from_millis(10));
/// let channel = BroadcastChannel::new(config);
///
/// let mut a = channel.register().await;
/// let mut b = channel.register().await;
///
/// channel.broadcast([1, 2]).await;
///
/// assert_eq!(a.recv().await, Some(1));
/// assert_eq!(b.recv().await, Some(1));
/// assert_eq!(a.recv().await, Some(2));
/// # }
/// ```
pub struct BroadcastChannel<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for BroadcastChannel<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> std::fmt::Debug for BroadcastChannel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BroadcastChannel")
            .field("config", &self.shared.config)
            .field("shutdown", &self.shared.shutdown.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl<T: Clone + Send + Sync + 'static> BroadcastChannel<T> {
    /// Create a channel with the given settings
    pub fn new(config: ChannelConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                registry: ConsumerRegistry::new(config.queue_capacity()),
                config,
                counters: Counters::default(),
                shutdown: CancellationToken::new(),
            }),
        }
    }

    /// Get the channel configuration
    pub fn config(&self) -> &ChannelConfig {
        &self.shared.config
    }

    /// Register a new consumer with its own queue
    pub async fn register(&self) -> Consumer<T> {
        self.shared.registry.register().await
    }

    /// Unregister a consumer
    ///
    /// Safe to call more than once or with an unknown id; returns whether a
    /// consumer was actually removed.
    pub async fn unregister(&self, id: ConsumerId) -> bool {
        self.shared.registry.unregister(id).await
    }

    /// Number of registered consumers
    pub async fn consumer_count(&self) -> usize {
        self.shared.registry.len().await
    }

    /// Snapshot of the channel's delivery counters
    pub async fn stats(&self) -> ChannelStats {
        let consumers = self.consumer_count().await;
        self.shared.counters.snapshot(consumers)
    }

    /// Deliver a single value to every registered consumer
    pub async fn send(&self, value: T) {
        self.broadcast([value]).await;
    }

    /// Deliver a batch of values to every registered consumer
    ///
    /// Each consumer receives the batch in order. A consumer whose delivery
    /// fails is evicted at once and skipped for the rest of the batch. With
    /// `resend` enabled, a catch-up pass is scheduled before delivery starts.
    pub async fn broadcast<I>(&self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        let targets = self.shared.registry.snapshot().await;

        self.shared.counters.record_broadcast();
        tracing::trace!(
            consumers = targets.len(),
            values = values.len(),
            "Broadcasting batch"
        );

        if self.shared.config.resend {
            self.shared.schedule_catch_up(&targets, values.clone());
        }

        self.shared.deliver(&targets, &values).await;
    }

    /// Create a write handle whose values are forwarded to [`send`](Self::send)
    ///
    /// The forwarding task stops once [`shutdown`](Self::shutdown) is called
    /// or every clone of the returned publisher has been dropped.
    pub fn publisher(&self) -> Publisher<T> {
        publisher::spawn_forwarder(
            self.clone(),
            self.shared.shutdown.clone(),
            self.shared.config.queue_capacity(),
        )
    }

    /// Stop all publisher forwarding tasks
    pub fn shutdown(&self) {
        self.shared.shutdown.cancel();
    }

    /// Check if [`shutdown`](Self::shutdown) has been called
    pub fn is_shutdown(&self) -> bool {
        self.shared.shutdown.is_cancelled()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for BroadcastChannel<T> {
    fn default() -> Self {
        Self::new(ChannelConfig::default())
    }
}

impl<T: Clone + Send + Sync + 'static> Shared<T> {
    async fn deliver(&self, targets: &[ConsumerSlot<T>], values: &[T]) {
        if targets.is_empty() {
            return;
        }

        let timeout = self.config.timeout;
        let mut failed: Vec<ConsumerId> = Vec::new();

        for value in values {
            for slot in targets {
                if failed.contains(&slot.id) {
                    continue;
                }

                match delivery::attempt(&slot.tx, value.clone(), timeout).await {
                    Ok(()) => self.counters.record_delivered(),
                    Err(e) => {
                        self.evict(slot.id, e).await;
                        failed.push(slot.id);
                    }
                }
            }
        }
    }

    async fn evict(&self, id: ConsumerId, error: DeliveryError) {
        // Another task may have removed it already
        if self.registry.unregister(id).await {
            self.counters.record_eviction();
            tracing::info!(consumer = %id, error = %error, "Consumer evicted");
        }
    }

    /// After one delivery timeout, replay `values` to every consumer that was
    /// not part of `before`.
    fn schedule_catch_up(self: &Arc<Self>, before: &[ConsumerSlot<T>], values: Vec<T>) {
        let known: HashSet<ConsumerId> = before.iter().map(|slot| slot.id).collect();
        let shared = Arc::clone(self);

        tokio::spawn(async move {
            tokio::time::sleep(shared.config.timeout).await;

            let late: Vec<ConsumerSlot<T>> = shared
                .registry
                .snapshot()
                .await
                .into_iter()
                .filter(|slot| !known.contains(&slot.id))
                .collect();

            if late.is_empty() {
                return;
            }

            tracing::debug!(
                late_joiners = late.len(),
                values = values.len(),
                "Replaying batch to late joiners"
            );

            shared.counters.record_catch_ups(late.len() as u64);
            shared.deliver(&late, &values).await;
        });
    }
}
