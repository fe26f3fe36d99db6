//! Cross-domain operation models.
//!
//! An operation is one logical transfer tracked end-to-end by the ledger:
//! a token deposit, a token withdrawal or a record bridge. Entries are
//! append-only; once a terminal status is reached no further transition is
//! permitted. The ledger is the audit trail and is never pruned.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::AccountId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationType {
    TokenDeposit,
    TokenWithdrawal,
    RecordBridge,
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationType::TokenDeposit => write!(f, "TOKEN_DEPOSIT"),
            OperationType::TokenWithdrawal => write!(f, "TOKEN_WITHDRAWAL"),
            OperationType::RecordBridge => write!(f, "RECORD_BRIDGE"),
        }
    }
}

impl OperationType {
    pub const ALL: [OperationType; 3] = [
        OperationType::TokenDeposit,
        OperationType::TokenWithdrawal,
        OperationType::RecordBridge,
    ];
}

impl std::str::FromStr for OperationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TOKEN_DEPOSIT" => Ok(OperationType::TokenDeposit),
            "TOKEN_WITHDRAWAL" => Ok(OperationType::TokenWithdrawal),
            "RECORD_BRIDGE" => Ok(OperationType::RecordBridge),
            other => Err(format!("unknown operation type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl OperationStatus {
    /// Completed and failed operations accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OperationStatus::Completed | OperationStatus::Failed)
    }
}

impl std::fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationStatus::Pending => write!(f, "PENDING"),
            OperationStatus::Processing => write!(f, "PROCESSING"),
            OperationStatus::Completed => write!(f, "COMPLETED"),
            OperationStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// The value an operation moves across domains.
///
/// Fungible flows carry a quantity; record bridges carry the identifier of
/// the record itself. Keeping these as distinct variants rules out the
/// quantity/identifier confusion a single numeric field invites.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BridgeValue {
    Quantity(u128),
    Record(u64),
}

impl BridgeValue {
    /// Contribution to the bridged-volume statistic. Records move
    /// identifiers, not value, and count as zero.
    pub fn volume(&self) -> u128 {
        match self {
            BridgeValue::Quantity(amount) => *amount,
            BridgeValue::Record(_) => 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Operation {
    pub id: u64,
    pub sender: AccountId,
    pub recipient: AccountId,
    #[serde(flatten)]
    pub value: BridgeValue,
    pub operation_type: OperationType,
    pub status: OperationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<String>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

/// One ledger state change requested by a relay message or a finalize call.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationTransition {
    pub operation_id: u64,
    pub outcome: TransitionOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    Complete,
    Fail { reason: String },
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DepositRequest {
    pub recipient: AccountId,
    pub amount: u128,
    /// Opaque call data forwarded to the counter domain.
    #[serde(default)]
    pub extra_data: Option<String>,
    /// Value attached to cover the relay submission cost.
    pub submission_fee: u128,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct WithdrawalRequest {
    pub recipient: AccountId,
    pub amount: u128,
    pub submission_fee: u128,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RecordBridgeRequest {
    pub record_id: u64,
    pub recipient: AccountId,
    /// Record metadata re-anchored on the destination domain.
    #[serde(default)]
    pub metadata: Option<String>,
    pub submission_fee: u128,
}
