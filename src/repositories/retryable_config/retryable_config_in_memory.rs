use async_trait::async_trait;
use dashmap::DashMap;

use crate::{
    models::{OperationType, RepositoryError, RetryableConfig},
    repositories::RetryableConfigRepositoryTrait,
};

#[derive(Debug)]
pub struct InMemoryRetryableConfigRepository {
    store: DashMap<OperationType, RetryableConfig>,
}

impl Default for InMemoryRetryableConfigRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRetryableConfigRepository {
    /// Creates the store with every operation type seeded to defaults.
    pub fn new() -> Self {
        let store = DashMap::new();
        for operation_type in OperationType::ALL {
            store.insert(operation_type, RetryableConfig::default());
        }
        Self { store }
    }
}

#[async_trait]
impl RetryableConfigRepositoryTrait for InMemoryRetryableConfigRepository {
    async fn get(&self, operation_type: OperationType) -> Result<RetryableConfig, RepositoryError> {
        self.store
            .get(&operation_type)
            .map(|config| config.clone())
            .ok_or_else(|| {
                RepositoryError::NotFound(format!("No config for type {}", operation_type))
            })
    }

    async fn update(
        &self,
        operation_type: OperationType,
        config: RetryableConfig,
    ) -> Result<RetryableConfig, RepositoryError> {
        self.store.insert(operation_type, config.clone());
        Ok(config)
    }

    async fn list(&self) -> Result<Vec<(OperationType, RetryableConfig)>, RepositoryError> {
        let mut entries: Vec<_> = self
            .store
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        entries.sort_by_key(|(operation_type, _)| operation_type.to_string());
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_with_defaults() {
        let repo = InMemoryRetryableConfigRepository::new();
        for operation_type in OperationType::ALL {
            let config = repo.get(operation_type).await.unwrap();
            assert_eq!(config, RetryableConfig::default());
        }
        assert_eq!(repo.list().await.unwrap().len(), OperationType::ALL.len());
    }

    #[tokio::test]
    async fn test_update_replaces_config() {
        let repo = InMemoryRetryableConfigRepository::new();
        let updated = RetryableConfig {
            base_submission_cost: 20_000_000_000_000_000,
            base_gas_limit: 150_000,
            gas_limit_per_byte: 150,
            max_retry_window_secs: 14 * 24 * 60 * 60,
            submission_fee_multiplier: 150,
        };

        repo.update(OperationType::TokenDeposit, updated.clone())
            .await
            .unwrap();

        assert_eq!(repo.get(OperationType::TokenDeposit).await.unwrap(), updated);
        // Other types keep their defaults.
        assert_eq!(
            repo.get(OperationType::TokenWithdrawal).await.unwrap(),
            RetryableConfig::default()
        );
    }
}
