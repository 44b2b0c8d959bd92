//! Producer adapter
//!
//! Lets producers push values one at a time through an ordinary bounded queue
//! instead of calling [`BroadcastChannel::broadcast`] themselves. A background
//! task drains the intake queue and broadcasts each value.

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_util::sync::CancellationToken;

use super::broadcast::BroadcastChannel;
use super::error::PublishError;

/// Write handle feeding a channel's forwarding task
///
/// Cloning yields another writer for the same intake queue. The forwarding
/// task exits once every clone is dropped or the channel is shut down.
///
/// # Example
/// ```
/// use fanout_channel::{BroadcastChannel, ChannelConfig};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let channel = BroadcastChannel::new(ChannelConfig::default().size(8));
/// let mut consumer = channel.register().await;
///
/// let publisher = channel.publisher();
/// publisher.send("hello").await.unwrap();
///
/// assert_eq!(consumer.recv().await, Some("hello"));
/// # }
/// ```
pub struct Publisher<T> {
    tx: mpsc::Sender<T>,
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Publisher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

impl<T> Publisher<T> {
    /// Queue a value for broadcast, waiting for intake space
    pub async fn send(&self, value: T) -> Result<(), PublishError<T>> {
        self.tx
            .send(value)
            .await
            .map_err(|e| PublishError::Closed(e.0))
    }

    /// Queue a value for broadcast without waiting
    pub fn try_send(&self, value: T) -> Result<(), PublishError<T>> {
        self.tx.try_send(value).map_err(|e| match e {
            TrySendError::Full(value) => PublishError::Full(value),
            TrySendError::Closed(value) => PublishError::Closed(value),
        })
    }

    /// Check if the forwarding task has stopped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Wait until the forwarding task has stopped
    pub async fn closed(&self) {
        self.tx.closed().await
    }
}

/// Spawn the forwarding task and return its write handle
pub(super) fn spawn_forwarder<T>(
    channel: BroadcastChannel<T>,
    shutdown: CancellationToken,
    capacity: usize,
) -> Publisher<T>
where
    T: Clone + Send + Sync + 'static,
{
    let (tx, mut rx) = mpsc::channel::<T>(capacity);

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Publisher forwarding stopped by shutdown");
                    break;
                }
                item = rx.recv() => match item {
                    Some(value) => channel.send(value).await,
                    None => {
                        tracing::debug!("All publishers dropped, forwarding stopped");
                        break;
                    }
                },
            }
        }
    });

    Publisher { tx }
}
