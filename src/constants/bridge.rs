//! Economic and timing bounds for cross-domain operations.
//! Submission costs are denominated in the domain's smallest base unit.

/// Hard cap on the submission fee multiplier, in percent.
pub const MAX_FEE_MULTIPLIER: u32 = 200;

/// Hard cap on the retry window for completion messages.
pub const MAX_RETRY_WINDOW_SECS: u64 = 30 * 24 * 60 * 60; // 30 days

/// Mandatory waiting period between initiating and finalizing a withdrawal.
pub const DEFAULT_WITHDRAWAL_DELAY_SECS: u64 = 7 * 24 * 60 * 60; // 7 days

pub const DEFAULT_BASE_SUBMISSION_COST: u128 = 10_000_000_000_000_000; // 0.01 in 18-decimal base units
pub const DEFAULT_BASE_GAS_LIMIT: u64 = 100_000;
pub const DEFAULT_GAS_LIMIT_PER_BYTE: u128 = 100;
pub const DEFAULT_RETRY_WINDOW_SECS: u64 = 7 * 24 * 60 * 60; // 7 days
pub const DEFAULT_FEE_MULTIPLIER: u32 = 120;
