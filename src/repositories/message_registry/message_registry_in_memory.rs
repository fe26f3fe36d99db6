//! In-memory consumed-message registry backed by a `DashMap`.
//!
//! The map's entry API gives the reserve step its check-and-set atomicity:
//! two submissions racing on one id resolve to exactly one vacant entry.
use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};

use crate::{
    models::{MessageId, RepositoryError},
    repositories::MessageRegistryTrait,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum MessageState {
    Reserved,
    Processed,
}

#[derive(Debug, Default)]
pub struct InMemoryMessageRegistry {
    store: DashMap<MessageId, MessageState>,
}

impl InMemoryMessageRegistry {
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }
}

#[async_trait]
impl MessageRegistryTrait for InMemoryMessageRegistry {
    async fn is_processed(&self, id: &MessageId) -> Result<bool, RepositoryError> {
        Ok(self
            .store
            .get(id)
            .map(|state| *state == MessageState::Processed)
            .unwrap_or(false))
    }

    async fn reserve(&self, id: &MessageId) -> Result<(), RepositoryError> {
        match self.store.entry(*id) {
            Entry::Occupied(_) => Err(RepositoryError::ConstraintViolation(
                "Message already processed".to_string(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(MessageState::Reserved);
                Ok(())
            }
        }
    }

    async fn commit(&self, id: &MessageId) -> Result<(), RepositoryError> {
        match self.store.get_mut(id) {
            Some(mut state) => {
                *state = MessageState::Processed;
                Ok(())
            }
            None => Err(RepositoryError::NotFound(format!(
                "No reservation for message {}",
                id
            ))),
        }
    }

    async fn release(&self, id: &MessageId) -> Result<(), RepositoryError> {
        let removed = self
            .store
            .remove_if(id, |_, state| *state == MessageState::Reserved);
        match removed {
            Some(_) => Ok(()),
            None => Err(RepositoryError::ConstraintViolation(format!(
                "Message {} is not releasable",
                id
            ))),
        }
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self
            .store
            .iter()
            .filter(|entry| *entry.value() == MessageState::Processed)
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountId;

    fn message_id(n: u64) -> MessageId {
        MessageId::derive(n, &AccountId::ZERO)
    }

    #[tokio::test]
    async fn test_reserve_commit_lifecycle() {
        let registry = InMemoryMessageRegistry::new();
        let id = message_id(1);

        assert!(!registry.is_processed(&id).await.unwrap());
        registry.reserve(&id).await.unwrap();

        // Reserved but not yet settled.
        assert!(!registry.is_processed(&id).await.unwrap());

        registry.commit(&id).await.unwrap();
        assert!(registry.is_processed(&id).await.unwrap());
        assert_eq!(registry.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_double_reserve_has_one_winner() {
        let registry = InMemoryMessageRegistry::new();
        let id = message_id(1);

        registry.reserve(&id).await.unwrap();
        let loser = registry.reserve(&id).await;
        assert!(matches!(
            loser,
            Err(RepositoryError::ConstraintViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_release_reopens_the_id() {
        let registry = InMemoryMessageRegistry::new();
        let id = message_id(1);

        registry.reserve(&id).await.unwrap();
        registry.release(&id).await.unwrap();

        // A redelivery can claim the id again.
        registry.reserve(&id).await.unwrap();
        registry.commit(&id).await.unwrap();
        assert!(registry.is_processed(&id).await.unwrap());
    }

    #[tokio::test]
    async fn test_committed_entry_cannot_be_released() {
        let registry = InMemoryMessageRegistry::new();
        let id = message_id(1);

        registry.reserve(&id).await.unwrap();
        registry.commit(&id).await.unwrap();

        let release = registry.release(&id).await;
        assert!(matches!(
            release,
            Err(RepositoryError::ConstraintViolation(_))
        ));
        assert!(registry.is_processed(&id).await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_reserves_have_exactly_one_winner() {
        use std::sync::Arc;

        let registry = Arc::new(InMemoryMessageRegistry::new());
        let id = message_id(1);

        let mut handles = Vec::new();
        for _ in 0..16 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                registry.reserve(&id).await.is_ok()
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }
}
