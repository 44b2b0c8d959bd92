//! Statistics and counters for broadcast channels

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of a channel's delivery counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelStats {
    /// Currently registered consumers
    pub consumers: usize,
    /// Broadcast calls made
    pub broadcasts: u64,
    /// Values accepted by consumer queues (including catch-up replays)
    pub delivered: u64,
    /// Consumers removed after a failed delivery
    pub evicted: u64,
    /// Late joiners served by catch-up passes
    pub catch_ups: u64,
}

impl ChannelStats {
    /// Fraction of delivery attempts that ended in eviction
    pub fn eviction_ratio(&self) -> f64 {
        let attempts = self.delivered + self.evicted;
        if attempts > 0 {
            self.evicted as f64 / attempts as f64
        } else {
            0.0
        }
    }
}

/// Live counters shared by every clone of a channel
#[derive(Debug, Default)]
pub(crate) struct Counters {
    broadcasts: AtomicU64,
    delivered: AtomicU64,
    evicted: AtomicU64,
    catch_ups: AtomicU64,
}

impl Counters {
    pub(crate) fn record_broadcast(&self) {
        self.broadcasts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_eviction(&self) {
        self.evicted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_catch_ups(&self, late_joiners: u64) {
        self.catch_ups.fetch_add(late_joiners, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, consumers: usize) -> ChannelStats {
        ChannelStats {
            consumers,
            broadcasts: self.broadcasts.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            evicted: self.evicted.load(Ordering::Relaxed),
            catch_ups: self.catch_ups.load(Ordering::Relaxed),
        }
    }
}
