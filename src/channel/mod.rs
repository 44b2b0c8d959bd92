//! Broadcast channel with per-consumer queues
//!
//! Producers hand values to the channel, which copies each one into the
//! bounded queue of every registered consumer. Consumers drain their own
//! queue at their own pace; a consumer that cannot keep up is evicted rather
//! than slowing producers or other consumers down.
//!
//! # Architecture
//!
//! ```text
//!     [Producer]            [Producer]
//!   broadcast(values)    Publisher::send()
//!         │                     │
//!         │              intake queue ──► forwarding task
//!         │                     │
//!         └──────────┬──────────┘
//!                    ▼
//!            BroadcastChannel
//!        ┌───────────────────────┐
//!        │ registry (RwLock)     │──► snapshot
//!        │   [id, queue tx] ...  │        │
//!        └───────────────────────┘        ▼
//!                          for each value, for each consumer:
//!                              attempt(queue, value, timeout)
//!                                 ├─ Ok  ──► next
//!                                 └─ Err ──► evict (unregister)
//!                    │
//!         ┌──────────┼──────────┐
//!         ▼          ▼          ▼
//!    [Consumer]  [Consumer]  [Consumer]
//!     recv()      recv()      recv()
//! ```
//!
//! # Catch-up
//!
//! With `resend` enabled, every broadcast also schedules a single deferred
//! pass: after one delivery timeout, consumers that registered since the
//! broadcast took its snapshot receive the same batch.

pub mod broadcast;
pub mod config;
pub mod consumer;
mod delivery;
pub mod error;
pub mod publisher;
mod registry;

pub use broadcast::BroadcastChannel;
pub use config::ChannelConfig;
pub use consumer::{Consumer, ConsumerId, TryRecvError};
pub use error::{DeliveryError, PublishError};
pub use publisher::Publisher;
