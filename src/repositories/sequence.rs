//! Monotonic operation id source.
//!
//! Ids start at 1, are never reused and survive for the lifetime of the
//! ledger. The in-memory implementation is a single atomic counter.
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::models::RepositoryError;

#[async_trait]
pub trait OperationSequenceTrait: Send + Sync {
    /// Returns the next unused id and advances the sequence.
    async fn next(&self) -> Result<u64, RepositoryError>;

    /// Ids handed out so far.
    async fn issued(&self) -> Result<u64, RepositoryError>;
}

#[derive(Debug, Default)]
pub struct InMemoryOperationSequence {
    counter: AtomicU64,
}

impl InMemoryOperationSequence {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl OperationSequenceTrait for InMemoryOperationSequence {
    async fn next(&self) -> Result<u64, RepositoryError> {
        Ok(self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn issued(&self) -> Result<u64, RepositoryError> {
        Ok(self.counter.load(Ordering::SeqCst))
    }
}
