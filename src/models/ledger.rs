//! Wire models for the domain asset ledger surface.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::AccountId;

/// Operator-gated credit of domain funds to an account, standing in for
/// the domain gateway observing an inbound transfer.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreditRequest {
    pub account: AccountId,
    pub amount: u128,
}

/// Operator-gated registration of a transferable record under an owner.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRecordRequest {
    pub record_id: u64,
    pub owner: AccountId,
}

/// Admin-only escape hatch draining escrowed funds outside the normal
/// operation path.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EmergencyWithdrawRequest {
    pub to: AccountId,
    pub amount: u128,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BalanceResponse {
    pub account: AccountId,
    pub balance: u128,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EscrowResponse {
    /// Funds locked behind in-flight and completed deposits.
    pub escrow_pool: u128,
    /// Accumulated submission fees funding relay operation.
    pub collected_fees: u128,
}
