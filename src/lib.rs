//! # fanout-channel
//!
//! A multi-producer, multi-consumer broadcast channel for tokio.
//!
//! Every consumer gets its own bounded queue and receives every value
//! broadcast while it is registered. Delivery into a queue waits at most a
//! configured timeout; a consumer that does not make room in time is evicted
//! so that one slow reader never stalls producers or other readers.
//!
//! ## Features
//! - Fan-out with per-consumer FIFO ordering
//! - Bounded-wait or non-blocking delivery
//! - Automatic eviction of unresponsive or dropped consumers
//! - Optional catch-up delivery for consumers that join mid-broadcast
//! - Queue-style [`Publisher`] handles with explicit shutdown
//!
//! ## Example
//! ```
//! use std::time::Duration;
//! use fanout_channel::{BroadcastChannel, ChannelConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let channel = BroadcastChannel::new(
//!     ChannelConfig::default()
//!         .size(16)
//!         .timeout(Duration::from_millis(5))
//!         .resend(),
//! );
//!
//! let mut consumer = channel.register().await;
//! let publisher = channel.publisher();
//!
//! publisher.send(42u64).await.unwrap();
//! assert_eq!(consumer.recv().await, Some(42));
//!
//! channel.unregister(consumer.id()).await;
//! channel.shutdown();
//! # }
//! ```

pub mod channel;
pub mod stats;

pub use channel::{
    BroadcastChannel, ChannelConfig, Consumer, ConsumerId, DeliveryError, PublishError, Publisher,
    TryRecvError,
};
pub use stats::ChannelStats;
