//! Consumed-message registry.
//!
//! The single source of truth for exactly-once processing. Consumption is
//! two-phase: a message id is first reserved (atomic check-and-set, exactly
//! one winner under concurrency), then either committed once the ledger
//! transitions land or released if they do not. Committed entries are
//! permanent.
use async_trait::async_trait;

use crate::models::{MessageId, RepositoryError};

mod message_registry_in_memory;
pub use message_registry_in_memory::*;

#[async_trait]
pub trait MessageRegistryTrait: Send + Sync {
    /// Whether the id has been definitively consumed.
    async fn is_processed(&self, id: &MessageId) -> Result<bool, RepositoryError>;

    /// Claims the id. Fails with a constraint violation if any other
    /// submission already claimed it, settled or not.
    async fn reserve(&self, id: &MessageId) -> Result<(), RepositoryError>;

    /// Settles a reservation permanently.
    async fn commit(&self, id: &MessageId) -> Result<(), RepositoryError>;

    /// Drops an unsettled reservation so the message can be redelivered.
    async fn release(&self, id: &MessageId) -> Result<(), RepositoryError>;

    async fn count(&self) -> Result<usize, RepositoryError>;
}
