use thiserror::Error;

use crate::models::{
    AccountId, ApiError, MessageId, OperationStatus, PayloadError, RepositoryError, Role,
};

/// Classification of a rejection, used to pick the HTTP status and to let
/// relay operators decide whether to retry, escalate or discard. Every
/// rejected call leaves ledger and registry state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong input; safe to retry with corrected parameters.
    Validation,
    /// Caller or message origin lacks the required authority.
    Authorization,
    /// Benign duplicate; callers treat this as success-equivalent.
    Idempotency,
    /// Precondition not yet true; poll and re-attempt.
    Timing,
    /// Attached value or configured parameter out of bounds.
    Economic,
    /// Transient administrative gate.
    Operational,
    /// Nothing the caller can do; investigate server-side.
    Internal,
}

#[derive(Error, Debug, PartialEq)]
pub enum BridgeError {
    #[error("Invalid recipient")]
    InvalidRecipient,

    #[error("Amount must be greater than 0")]
    ZeroAmount,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Multiplier too high")]
    MultiplierTooHigh,

    #[error("Retry window too long")]
    RetryWindowTooLong,

    #[error("Unauthorized: account {caller} is missing role {required}")]
    Unauthorized { caller: AccountId, required: Role },

    #[error("Invalid message sender")]
    InvalidMessageSender(AccountId),

    #[error("Message already processed")]
    MessageAlreadyProcessed(MessageId),

    #[error("Unknown selector: {0}")]
    UnknownSelector(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Withdrawal delay not met")]
    WithdrawalDelayNotMet,

    #[error("Insufficient submission cost: required {required}, attached {attached}")]
    InsufficientSubmissionCost { required: u128, attached: u128 },

    #[error("Insufficient balance")]
    InsufficientBalance(AccountId),

    #[error("Record {record_id} is not held by {account}")]
    RecordNotOwned { record_id: u64, account: AccountId },

    #[error("Record {0} already registered")]
    RecordAlreadyRegistered(u64),

    #[error("Insufficient escrow balance")]
    InsufficientEscrow,

    #[error("Operation {operation_id} is already {status}")]
    InvalidTransition {
        operation_id: u64,
        status: OperationStatus,
    },

    #[error("Operation {0} not found")]
    OperationNotFound(u64),

    #[error("Operation {0} is not a withdrawal")]
    NotAWithdrawal(u64),

    #[error("Bridge is paused")]
    Paused,

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BridgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::InvalidRecipient
            | BridgeError::ZeroAmount
            | BridgeError::UnknownSelector(_)
            | BridgeError::MalformedPayload(_)
            | BridgeError::NotAWithdrawal(_)
            | BridgeError::RecordNotOwned { .. }
            | BridgeError::RecordAlreadyRegistered(_)
            | BridgeError::OperationNotFound(_)
            | BridgeError::InvalidConfig(_) => ErrorKind::Validation,
            BridgeError::Unauthorized { .. } | BridgeError::InvalidMessageSender(_) => {
                ErrorKind::Authorization
            }
            BridgeError::MessageAlreadyProcessed(_) | BridgeError::InvalidTransition { .. } => {
                ErrorKind::Idempotency
            }
            BridgeError::WithdrawalDelayNotMet => ErrorKind::Timing,
            BridgeError::InsufficientSubmissionCost { .. }
            | BridgeError::InsufficientBalance(_)
            | BridgeError::InsufficientEscrow
            | BridgeError::MultiplierTooHigh
            | BridgeError::RetryWindowTooLong => ErrorKind::Economic,
            BridgeError::Paused => ErrorKind::Operational,
            BridgeError::Repository(_) | BridgeError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<PayloadError> for BridgeError {
    fn from(error: PayloadError) -> Self {
        match error {
            PayloadError::UnknownSelector(selector) => BridgeError::UnknownSelector(selector),
            other => BridgeError::MalformedPayload(other.to_string()),
        }
    }
}

impl From<BridgeError> for ApiError {
    fn from(error: BridgeError) -> Self {
        let message = error.to_string();
        match error.kind() {
            ErrorKind::Validation | ErrorKind::Economic => match error {
                BridgeError::OperationNotFound(_) => ApiError::NotFound(message),
                _ => ApiError::BadRequest(message),
            },
            ErrorKind::Authorization => ApiError::Forbidden(message),
            ErrorKind::Idempotency | ErrorKind::Timing => ApiError::Conflict(message),
            ErrorKind::Operational => ApiError::ServiceUnavailable(message),
            ErrorKind::Internal => ApiError::InternalError(message),
        }
    }
}
