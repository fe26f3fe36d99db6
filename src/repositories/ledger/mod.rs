//! Domain asset custody.
//!
//! Tracks the initiating domain's fungible balances, the bridge escrow
//! pool, collected submission fees and record custody. Escrow always moves
//! before anything is released on the counter domain: deposits debit into
//! the pool at initiation, withdrawals burn at initiation, records lock at
//! initiation. The only exits for escrowed value are the failure refund
//! path and the admin emergency drain.
use async_trait::async_trait;

use crate::models::{AccountId, RepositoryError};

mod ledger_in_memory;
pub use ledger_in_memory::*;

/// Where a transferable record currently sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordState {
    pub owner: AccountId,
    /// Held in bridge custody while an operation is in flight or after it
    /// completed on the counter domain.
    pub locked: bool,
}

#[async_trait]
pub trait LedgerTrait: Send + Sync {
    async fn balance_of(&self, account: &AccountId) -> Result<u128, RepositoryError>;

    /// Credits domain funds to an account (gateway-observed inbound value).
    async fn credit(&self, account: &AccountId, amount: u128) -> Result<u128, RepositoryError>;

    /// Moves funds from an account into the escrow pool (deposit initiation).
    async fn debit_to_escrow(
        &self,
        account: &AccountId,
        amount: u128,
    ) -> Result<(), RepositoryError>;

    /// Returns escrowed funds to an account (deposit failure refund).
    async fn refund_from_escrow(
        &self,
        account: &AccountId,
        amount: u128,
    ) -> Result<(), RepositoryError>;

    /// Destroys funds on this domain (withdrawal initiation).
    async fn burn(&self, account: &AccountId, amount: u128) -> Result<(), RepositoryError>;

    async fn escrow_pool(&self) -> Result<u128, RepositoryError>;

    async fn collect_fee(&self, amount: u128) -> Result<(), RepositoryError>;

    async fn collected_fees(&self) -> Result<u128, RepositoryError>;

    /// Registers a record under an owner (gateway-observed inbound record).
    async fn register_record(
        &self,
        record_id: u64,
        owner: &AccountId,
    ) -> Result<(), RepositoryError>;

    async fn record_state(&self, record_id: u64) -> Result<Option<RecordState>, RepositoryError>;

    /// Takes a record into bridge custody (record bridge initiation). The
    /// caller must currently hold it unlocked.
    async fn lock_record(&self, record_id: u64, owner: &AccountId) -> Result<(), RepositoryError>;

    /// Returns a locked record to its owner (record bridge failure refund).
    async fn unlock_record(&self, record_id: u64) -> Result<(), RepositoryError>;

    /// Admin escape hatch: drains escrowed funds to an account outside the
    /// operation path.
    async fn emergency_withdraw(
        &self,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), RepositoryError>;
}
