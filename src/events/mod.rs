//! Bridge event emission.
//!
//! State changes are broadcast to in-process subscribers (monitoring,
//! notification collaborators) and appended to an audit log. Emission is a
//! side effect of an already-committed state change, never part of it: a
//! subscriber lagging or disconnecting cannot affect the ledger.
use async_trait::async_trait;
use log::info;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use utoipa::ToSchema;

use crate::models::{AccountId, BridgeValue, MessageId, OperationType, Role};

#[cfg(test)]
use mockall::automock;

const BROADCAST_CAPACITY: usize = 256;

#[derive(Error, Debug, Serialize)]
pub enum EventPublisherError {
    #[error("Publish error: {0}")]
    PublishError(String),
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BridgeEvent {
    OperationInitiated {
        id: u64,
        sender: AccountId,
        operation_type: OperationType,
        value: BridgeValue,
    },
    OperationCompleted {
        id: u64,
    },
    OperationFailed {
        id: u64,
        reason: String,
    },
    MessageProcessed {
        message_id: MessageId,
    },
    /// Logged distinctly from normal completions: funds left custody
    /// outside the operation path.
    EmergencyWithdrawal {
        to: AccountId,
        amount: u128,
    },
    BridgePaused,
    BridgeUnpaused,
    ConfigUpdated {
        operation_type: OperationType,
    },
    EndpointAuthorized {
        endpoint: AccountId,
    },
    EndpointRevoked {
        endpoint: AccountId,
    },
    RoleGranted {
        account: AccountId,
        role: Role,
    },
    RoleRevoked {
        account: AccountId,
        role: Role,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct AuditEntry {
    pub sequence: u64,
    pub recorded_at: String,
    #[serde(flatten)]
    pub event: BridgeEvent,
}

#[async_trait]
#[cfg_attr(test, automock)]
pub trait EventPublisherTrait: Send + Sync {
    async fn publish(
        &self,
        event: BridgeEvent,
        recorded_at: String,
    ) -> Result<(), EventPublisherError>;
}

/// Broadcast channel plus append-only audit log.
#[derive(Debug)]
pub struct InProcessEventBus {
    sender: broadcast::Sender<BridgeEvent>,
    audit: Mutex<Vec<AuditEntry>>,
}

impl Default for InProcessEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl InProcessEventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            sender,
            audit: Mutex::new(Vec::new()),
        }
    }

    /// Live event feed for in-process collaborators.
    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.sender.subscribe()
    }

    /// Audit entries from `offset`, at most `limit`.
    pub async fn audit_log(&self, offset: usize, limit: usize) -> (Vec<AuditEntry>, u64) {
        let audit = self.audit.lock().await;
        let total = audit.len() as u64;
        let items = audit.iter().skip(offset).take(limit).cloned().collect();
        (items, total)
    }
}

#[async_trait]
impl EventPublisherTrait for InProcessEventBus {
    async fn publish(
        &self,
        event: BridgeEvent,
        recorded_at: String,
    ) -> Result<(), EventPublisherError> {
        info!("Bridge event: {:?}", event);

        let mut audit = self.audit.lock().await;
        let entry = AuditEntry {
            sequence: audit.len() as u64 + 1,
            recorded_at,
            event: event.clone(),
        };
        audit.push(entry);
        drop(audit);

        // A send error only means there are no live subscribers.
        let _ = self.sender.send(event);
        Ok(())
    }
}
