//! Role and pause-state wire models for the administrative surface.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::AccountId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Pause/unpause, emergency recovery, role administration.
    Admin,
    /// Retryable configuration and endpoint allowlist management,
    /// domain ledger crediting.
    Operator,
    /// Submission of completion messages.
    Relayer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Operator => write!(f, "OPERATOR"),
            Role::Relayer => write!(f, "RELAYER"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RoleRequest {
    pub account: AccountId,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EndpointRequest {
    pub endpoint: AccountId,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PauseStateResponse {
    pub paused: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        let back: Role = serde_json::from_str("\"RELAYER\"").unwrap();
        assert_eq!(back, Role::Relayer);
    }
}
