//! Per-operation-type retryable economics.
//!
//! Each operation type carries the parameters that price its relay
//! submission and bound how long and how expensively a completion message
//! may be retried on the counter domain.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::{
    DEFAULT_BASE_GAS_LIMIT, DEFAULT_BASE_SUBMISSION_COST, DEFAULT_FEE_MULTIPLIER,
    DEFAULT_GAS_LIMIT_PER_BYTE, DEFAULT_RETRY_WINDOW_SECS,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct RetryableConfig {
    pub base_submission_cost: u128,
    pub base_gas_limit: u64,
    pub gas_limit_per_byte: u128,
    pub max_retry_window_secs: u64,
    /// Percentage applied to the base estimate; 100 means no surcharge.
    pub submission_fee_multiplier: u32,
}

impl Default for RetryableConfig {
    fn default() -> Self {
        Self {
            base_submission_cost: DEFAULT_BASE_SUBMISSION_COST,
            base_gas_limit: DEFAULT_BASE_GAS_LIMIT,
            gas_limit_per_byte: DEFAULT_GAS_LIMIT_PER_BYTE,
            max_retry_window_secs: DEFAULT_RETRY_WINDOW_SECS,
            submission_fee_multiplier: DEFAULT_FEE_MULTIPLIER,
        }
    }
}

impl RetryableConfig {
    /// Prices a submission for a payload of the given size:
    /// `(base + size * per_byte) * multiplier / 100`.
    pub fn estimate_cost(&self, payload_size: usize) -> u128 {
        let raw = self
            .base_submission_cost
            .saturating_add(self.gas_limit_per_byte.saturating_mul(payload_size as u128));
        raw.saturating_mul(self.submission_fee_multiplier as u128) / 100
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RetryableConfigUpdateRequest {
    pub base_submission_cost: u128,
    pub base_gas_limit: u64,
    pub gas_limit_per_byte: u128,
    pub max_retry_window_secs: u64,
    pub submission_fee_multiplier: u32,
}

impl From<RetryableConfigUpdateRequest> for RetryableConfig {
    fn from(request: RetryableConfigUpdateRequest) -> Self {
        Self {
            base_submission_cost: request.base_submission_cost,
            base_gas_limit: request.base_gas_limit,
            gas_limit_per_byte: request.gas_limit_per_byte,
            max_retry_window_secs: request.max_retry_window_secs,
            submission_fee_multiplier: request.submission_fee_multiplier,
        }
    }
}
