//! Aggregate bridge statistics, a pure projection over the operation ledger.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct BridgeStats {
    /// Count of all operations ever created.
    pub total_operations: u64,
    /// Sum of fungible amounts over initiated operations, accounted at
    /// initiation to reflect locked value.
    pub total_volume: u128,
    /// Number of distinct accounts seen as sender or recipient.
    pub unique_users: u64,
}
