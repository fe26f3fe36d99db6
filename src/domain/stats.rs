//! Incrementally maintained bridge statistics.
//!
//! A pure projection over the operation ledger: the aggregator is driven
//! exclusively by operation creation and has no independent write path.
//! Volume is accounted at initiation to reflect locked value.
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Mutex,
};

use dashmap::DashSet;

use crate::models::{AccountId, BridgeStats, Operation};

#[derive(Debug, Default)]
pub struct StatsAggregator {
    total_operations: AtomicU64,
    total_volume: Mutex<u128>,
    users: DashSet<AccountId>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hook invoked once per created operation.
    pub fn record_initiated(&self, operation: &Operation) {
        self.total_operations.fetch_add(1, Ordering::SeqCst);
        let mut volume = self.total_volume.lock().expect("stats lock poisoned");
        *volume = volume.saturating_add(operation.value.volume());
        drop(volume);
        self.users.insert(operation.sender);
        self.users.insert(operation.recipient);
    }

    pub fn snapshot(&self) -> BridgeStats {
        BridgeStats {
            total_operations: self.total_operations.load(Ordering::SeqCst),
            total_volume: *self.total_volume.lock().expect("stats lock poisoned"),
            unique_users: self.users.len() as u64,
        }
    }
}
