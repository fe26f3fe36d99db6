//! Operation ledger storage.
//!
//! Sequential, append-only record of every cross-domain operation. Entries
//! are never deleted; terminal statuses accept no further transitions.
//! `apply_transitions` validates a whole batch before applying any of it,
//! so a relay message either advances all the operations it names or none.
use async_trait::async_trait;

use crate::{
    models::{AccountId, Operation, OperationTransition, PaginationQuery, RepositoryError},
    repositories::PaginatedResult,
};

mod operation_in_memory;
pub use operation_in_memory::*;

#[async_trait]
pub trait OperationRepositoryTrait: Send + Sync {
    async fn create(&self, operation: Operation) -> Result<Operation, RepositoryError>;

    async fn get_by_id(&self, id: u64) -> Result<Operation, RepositoryError>;

    async fn list_all(&self) -> Result<Vec<Operation>, RepositoryError>;

    /// Operations initiated by the given account, oldest first.
    async fn list_by_user(
        &self,
        account: &AccountId,
        query: PaginationQuery,
    ) -> Result<PaginatedResult<Operation>, RepositoryError>;

    async fn count(&self) -> Result<usize, RepositoryError>;

    /// Applies a batch of state transitions as one atomic unit: every
    /// target must exist and be non-terminal, and the batch must not name
    /// the same operation twice, or nothing is applied.
    async fn apply_transitions(
        &self,
        transitions: &[OperationTransition],
        completed_at: &str,
    ) -> Result<Vec<Operation>, RepositoryError>;
}
