//! In-memory asset ledger. One `Mutex` over all custody state keeps each
//! balance movement a single read-check-write unit.
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, MutexGuard};

use crate::{
    models::{AccountId, RepositoryError},
    repositories::{LedgerTrait, RecordState},
};

#[derive(Debug, Default)]
struct LedgerStore {
    balances: HashMap<AccountId, u128>,
    escrow_pool: u128,
    collected_fees: u128,
    records: HashMap<u64, RecordState>,
}

#[derive(Debug, Default)]
pub struct InMemoryLedger {
    store: Mutex<LedgerStore>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(LedgerStore::default()),
        }
    }

    async fn acquire_lock(&self) -> Result<MutexGuard<'_, LedgerStore>, RepositoryError> {
        Ok(self.store.lock().await)
    }
}

#[async_trait]
impl LedgerTrait for InMemoryLedger {
    async fn balance_of(&self, account: &AccountId) -> Result<u128, RepositoryError> {
        let store = self.acquire_lock().await?;
        Ok(store.balances.get(account).copied().unwrap_or(0))
    }

    async fn credit(&self, account: &AccountId, amount: u128) -> Result<u128, RepositoryError> {
        let mut store = self.acquire_lock().await?;
        let balance = store.balances.entry(*account).or_insert(0);
        *balance = balance.saturating_add(amount);
        Ok(*balance)
    }

    async fn debit_to_escrow(
        &self,
        account: &AccountId,
        amount: u128,
    ) -> Result<(), RepositoryError> {
        let mut store = self.acquire_lock().await?;
        let balance = store.balances.get(account).copied().unwrap_or(0);
        if balance < amount {
            return Err(RepositoryError::ConstraintViolation(
                "Insufficient balance".to_string(),
            ));
        }
        store.balances.insert(*account, balance - amount);
        store.escrow_pool += amount;
        Ok(())
    }

    async fn refund_from_escrow(
        &self,
        account: &AccountId,
        amount: u128,
    ) -> Result<(), RepositoryError> {
        let mut store = self.acquire_lock().await?;
        if store.escrow_pool < amount {
            return Err(RepositoryError::ConstraintViolation(format!(
                "Escrow pool holds less than {}",
                amount
            )));
        }
        store.escrow_pool -= amount;
        let balance = store.balances.entry(*account).or_insert(0);
        *balance = balance.saturating_add(amount);
        Ok(())
    }

    async fn burn(&self, account: &AccountId, amount: u128) -> Result<(), RepositoryError> {
        let mut store = self.acquire_lock().await?;
        let balance = store.balances.get(account).copied().unwrap_or(0);
        if balance < amount {
            return Err(RepositoryError::ConstraintViolation(
                "Insufficient balance".to_string(),
            ));
        }
        store.balances.insert(*account, balance - amount);
        Ok(())
    }

    async fn escrow_pool(&self) -> Result<u128, RepositoryError> {
        let store = self.acquire_lock().await?;
        Ok(store.escrow_pool)
    }

    async fn collect_fee(&self, amount: u128) -> Result<(), RepositoryError> {
        let mut store = self.acquire_lock().await?;
        store.collected_fees = store.collected_fees.saturating_add(amount);
        Ok(())
    }

    async fn collected_fees(&self) -> Result<u128, RepositoryError> {
        let store = self.acquire_lock().await?;
        Ok(store.collected_fees)
    }

    async fn register_record(
        &self,
        record_id: u64,
        owner: &AccountId,
    ) -> Result<(), RepositoryError> {
        let mut store = self.acquire_lock().await?;
        if store.records.contains_key(&record_id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "Record {} already registered",
                record_id
            )));
        }
        store.records.insert(
            record_id,
            RecordState {
                owner: *owner,
                locked: false,
            },
        );
        Ok(())
    }

    async fn record_state(&self, record_id: u64) -> Result<Option<RecordState>, RepositoryError> {
        let store = self.acquire_lock().await?;
        Ok(store.records.get(&record_id).cloned())
    }

    async fn lock_record(&self, record_id: u64, owner: &AccountId) -> Result<(), RepositoryError> {
        let mut store = self.acquire_lock().await?;
        let record = store.records.get_mut(&record_id).ok_or_else(|| {
            RepositoryError::NotFound(format!("Record {} not found", record_id))
        })?;
        if record.owner != *owner || record.locked {
            return Err(RepositoryError::ConstraintViolation(format!(
                "Record {} is not held by {}",
                record_id, owner
            )));
        }
        record.locked = true;
        Ok(())
    }

    async fn unlock_record(&self, record_id: u64) -> Result<(), RepositoryError> {
        let mut store = self.acquire_lock().await?;
        let record = store.records.get_mut(&record_id).ok_or_else(|| {
            RepositoryError::NotFound(format!("Record {} not found", record_id))
        })?;
        if !record.locked {
            return Err(RepositoryError::ConstraintViolation(format!(
                "Record {} is not in custody",
                record_id
            )));
        }
        record.locked = false;
        Ok(())
    }

    async fn emergency_withdraw(
        &self,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), RepositoryError> {
        let mut store = self.acquire_lock().await?;
        if store.escrow_pool < amount {
            return Err(RepositoryError::ConstraintViolation(format!(
                "Escrow pool holds less than {}",
                amount
            )));
        }
        store.escrow_pool -= amount;
        let balance = store.balances.entry(*to).or_insert(0);
        *balance = balance.saturating_add(amount);
        Ok(())
    }
}
