//! Fan-out demo
//!
//! Two producers publish frames while three consumers read them at different
//! speeds. The slowest consumer falls behind and gets evicted.
//!
//! Run with `RUST_LOG=fanout_channel=debug cargo run --example fan_out`.

use std::time::Duration;

use bytes::Bytes;
use fanout_channel::{BroadcastChannel, ChannelConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fan_out=info".parse().unwrap()))
        .init();

    let config = ChannelConfig::default()
        .size(4)
        .timeout(Duration::from_millis(20))
        .resend();
    let channel = BroadcastChannel::<Bytes>::new(config);

    let mut readers = Vec::new();
    let mut ids = Vec::new();
    for (name, delay_ms) in [("fast", 1u64), ("steady", 5), ("stalled", 200)] {
        let mut consumer = channel.register().await;
        ids.push(consumer.id());
        readers.push(tokio::spawn(async move {
            let mut frames = 0usize;
            while let Some(frame) = consumer.recv().await {
                frames += 1;
                tracing::debug!(consumer = name, len = frame.len(), "Frame received");
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            tracing::info!(consumer = name, frames, "Consumer finished");
        }));
    }

    let mut producers = Vec::new();
    for id in 0..2u8 {
        let publisher = channel.publisher();
        producers.push(tokio::spawn(async move {
            for seq in 0..25u8 {
                let frame = Bytes::from(vec![id, seq]);
                if publisher.send(frame).await.is_err() {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(2)).await;
            }
        }));
    }

    for producer in producers {
        let _ = producer.await;
    }
    tokio::time::sleep(Duration::from_millis(100)).await;

    tracing::info!(stats = ?channel.stats().await, "Broadcast finished");

    // Removing the remaining consumers ends their streams
    channel.shutdown();
    for id in ids {
        channel.unregister(id).await;
    }
    for reader in readers {
        let _ = reader.await;
    }
}
