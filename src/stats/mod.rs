//! Delivery statistics for broadcast channels

pub mod metrics;

pub use metrics::ChannelStats;
