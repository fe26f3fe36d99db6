//! In-memory operation ledger.
//!
//! A `Mutex`-protected store keyed by operation id with a per-initiator
//! index. The single lock is what makes batched transitions atomic with
//! respect to concurrent relay submissions and finalize calls.
use std::collections::HashMap;

use async_trait::async_trait;
use itertools::Itertools;
use tokio::sync::{Mutex, MutexGuard};

use crate::{
    models::{
        AccountId, Operation, OperationStatus, OperationTransition, PaginationQuery,
        RepositoryError, TransitionOutcome,
    },
    repositories::{OperationRepositoryTrait, PaginatedResult},
};

#[derive(Debug, Default)]
struct OperationStore {
    operations: HashMap<u64, Operation>,
    by_sender: HashMap<AccountId, Vec<u64>>,
}

#[derive(Debug, Default)]
pub struct InMemoryOperationRepository {
    store: Mutex<OperationStore>,
}

impl InMemoryOperationRepository {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(OperationStore::default()),
        }
    }

    async fn acquire_lock(&self) -> Result<MutexGuard<'_, OperationStore>, RepositoryError> {
        Ok(self.store.lock().await)
    }
}

#[async_trait]
impl OperationRepositoryTrait for InMemoryOperationRepository {
    async fn create(&self, operation: Operation) -> Result<Operation, RepositoryError> {
        let mut store = self.acquire_lock().await?;
        if store.operations.contains_key(&operation.id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "Operation with id {} already exists",
                operation.id
            )));
        }
        store
            .by_sender
            .entry(operation.sender)
            .or_default()
            .push(operation.id);
        store.operations.insert(operation.id, operation.clone());
        Ok(operation)
    }

    async fn get_by_id(&self, id: u64) -> Result<Operation, RepositoryError> {
        let store = self.acquire_lock().await?;
        store
            .operations
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Operation with id {} not found", id)))
    }

    async fn list_all(&self) -> Result<Vec<Operation>, RepositoryError> {
        let store = self.acquire_lock().await?;
        Ok(store
            .operations
            .values()
            .sorted_by_key(|op| op.id)
            .cloned()
            .collect())
    }

    async fn list_by_user(
        &self,
        account: &AccountId,
        query: PaginationQuery,
    ) -> Result<PaginatedResult<Operation>, RepositoryError> {
        let store = self.acquire_lock().await?;
        let ids = store.by_sender.get(account).cloned().unwrap_or_default();
        let total = ids.len() as u64;

        if total == 0 {
            return Ok(PaginatedResult {
                items: vec![],
                total: 0,
                page: query.page,
                per_page: query.per_page,
            });
        }

        let start = ((query.page.max(1) - 1) * query.per_page) as usize;
        let items = ids
            .iter()
            .filter_map(|id| store.operations.get(id))
            .sorted_by_key(|op| op.id)
            .skip(start)
            .take(query.per_page as usize)
            .cloned()
            .collect();

        Ok(PaginatedResult {
            items,
            total,
            page: query.page,
            per_page: query.per_page,
        })
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        let store = self.acquire_lock().await?;
        Ok(store.operations.len())
    }

    async fn apply_transitions(
        &self,
        transitions: &[OperationTransition],
        completed_at: &str,
    ) -> Result<Vec<Operation>, RepositoryError> {
        let mut store = self.acquire_lock().await?;

        // Validate the whole batch before touching anything.
        let mut seen = std::collections::HashSet::new();
        for transition in transitions {
            if !seen.insert(transition.operation_id) {
                return Err(RepositoryError::ConstraintViolation(format!(
                    "Operation {} named twice in one batch",
                    transition.operation_id
                )));
            }
            let operation = store.operations.get(&transition.operation_id).ok_or_else(|| {
                RepositoryError::NotFound(format!(
                    "Operation with id {} not found",
                    transition.operation_id
                ))
            })?;
            if operation.status.is_terminal() {
                return Err(RepositoryError::ConstraintViolation(format!(
                    "Operation {} is already {}",
                    operation.id, operation.status
                )));
            }
        }

        let mut updated = Vec::with_capacity(transitions.len());
        for transition in transitions {
            let operation = store
                .operations
                .get_mut(&transition.operation_id)
                .expect("validated above");
            match &transition.outcome {
                TransitionOutcome::Complete => {
                    operation.status = OperationStatus::Completed;
                }
                TransitionOutcome::Fail { reason } => {
                    operation.status = OperationStatus::Failed;
                    operation.status_reason = Some(reason.clone());
                }
            }
            operation.completed_at = Some(completed_at.to_string());
            updated.push(operation.clone());
        }
        Ok(updated)
    }
}
