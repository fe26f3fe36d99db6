//! Per-operation-type retryable configuration store.
//!
//! Seeded with defaults for every operation type at construction; mutated
//! only through the operator-gated update path in the domain layer.
use async_trait::async_trait;

use crate::models::{OperationType, RepositoryError, RetryableConfig};

mod retryable_config_in_memory;
pub use retryable_config_in_memory::*;

#[async_trait]
pub trait RetryableConfigRepositoryTrait: Send + Sync {
    async fn get(&self, operation_type: OperationType) -> Result<RetryableConfig, RepositoryError>;

    async fn update(
        &self,
        operation_type: OperationType,
        config: RetryableConfig,
    ) -> Result<RetryableConfig, RepositoryError>;

    async fn list(&self) -> Result<Vec<(OperationType, RetryableConfig)>, RepositoryError>;
}
