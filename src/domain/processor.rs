//! Relay message processing.
//!
//! Validates inbound completion messages against the authorized-endpoint
//! allowlist and the consumed-message registry, decodes the instruction
//! payload and drives operation ledger transitions. Applying the
//! transitions and recording the message are one atomic unit: the registry
//! reservation is only committed after the ledger accepted the whole batch,
//! and released on any rejection so a corrected redelivery can land.
use std::sync::Arc;

use log::{info, warn};

use crate::{
    domain::{AccessControl, BridgePolicy},
    events::{BridgeEvent, EventPublisherTrait},
    models::{
        decode_payload, AccountId, BridgeError, BridgeValue, Operation, OperationStatus,
        OperationTransition, OperationType, ProcessMessageRequest, RepositoryError, Role,
    },
    repositories::{LedgerTrait, MessageRegistryTrait, OperationRepositoryTrait},
    utils::Clock,
};

pub struct RelayProcessor {
    operations: Arc<dyn OperationRepositoryTrait>,
    registry: Arc<dyn MessageRegistryTrait>,
    ledger: Arc<dyn LedgerTrait>,
    access: Arc<AccessControl>,
    events: Arc<dyn EventPublisherTrait>,
    clock: Arc<dyn Clock>,
    policy: BridgePolicy,
}

impl RelayProcessor {
    pub fn new(
        operations: Arc<dyn OperationRepositoryTrait>,
        registry: Arc<dyn MessageRegistryTrait>,
        ledger: Arc<dyn LedgerTrait>,
        access: Arc<AccessControl>,
        events: Arc<dyn EventPublisherTrait>,
        clock: Arc<dyn Clock>,
        policy: BridgePolicy,
    ) -> Self {
        Self {
            operations,
            registry,
            ledger,
            access,
            events,
            clock,
            policy,
        }
    }

    fn timestamp(&self) -> String {
        self.clock.now().to_rfc3339()
    }

    async fn publish(&self, event: BridgeEvent) -> Result<(), BridgeError> {
        self.events
            .publish(event, self.timestamp())
            .await
            .map_err(|e| BridgeError::Internal(e.to_string()))
    }

    /// Applies one relay completion message exactly once.
    ///
    /// Returns the operations the message advanced. A duplicate submission
    /// fails with `MessageAlreadyProcessed`, which relay operators treat as
    /// success-equivalent.
    pub async fn process_message(
        &self,
        caller: AccountId,
        request: ProcessMessageRequest,
    ) -> Result<Vec<Operation>, BridgeError> {
        self.access.require_role(&caller, Role::Relayer)?;

        // Completion messages settle operations whose escrow already moved,
        // so by default they keep draining while paused; the policy flag
        // closes that path for deployments that want a full stop.
        if self.access.is_paused() && !self.policy.drain_while_paused {
            return Err(BridgeError::Paused);
        }

        if !self.access.is_authorized_endpoint(&request.source_endpoint) {
            return Err(BridgeError::InvalidMessageSender(request.source_endpoint));
        }

        // Atomic check-and-set: exactly one submission per id gets past
        // this point, ever.
        self.registry
            .reserve(&request.message_id)
            .await
            .map_err(|e| match e {
                RepositoryError::ConstraintViolation(_) => {
                    BridgeError::MessageAlreadyProcessed(request.message_id)
                }
                other => BridgeError::Repository(other),
            })?;

        match self.apply_message(&request).await {
            Ok(updated) => {
                self.registry.commit(&request.message_id).await?;
                for operation in &updated {
                    let event = match operation.status {
                        OperationStatus::Failed => BridgeEvent::OperationFailed {
                            id: operation.id,
                            reason: operation
                                .status_reason
                                .clone()
                                .unwrap_or_else(|| "relay reported failure".to_string()),
                        },
                        _ => BridgeEvent::OperationCompleted { id: operation.id },
                    };
                    self.publish(event).await?;
                }
                self.publish(BridgeEvent::MessageProcessed {
                    message_id: request.message_id,
                })
                .await?;
                info!(
                    "Message {} processed, {} operation(s) advanced",
                    request.message_id,
                    updated.len()
                );
                Ok(updated)
            }
            Err(error) => {
                // The ledger refused the batch; reopen the id so a
                // corrected redelivery is possible.
                if let Err(release_error) = self.registry.release(&request.message_id).await {
                    warn!(
                        "Failed to release reservation for {}: {}",
                        request.message_id, release_error
                    );
                }
                Err(error)
            }
        }
    }

    async fn apply_message(
        &self,
        request: &ProcessMessageRequest,
    ) -> Result<Vec<Operation>, BridgeError> {
        let instructions = decode_payload(&request.payload)?;

        // Surface typed errors before the atomic apply; the repository
        // re-validates the batch under its own lock.
        let mut transitions = Vec::with_capacity(instructions.len());
        for instruction in instructions {
            let operation = self
                .operations
                .get_by_id(instruction.operation_id)
                .await
                .map_err(|e| match e {
                    RepositoryError::NotFound(_) => {
                        BridgeError::OperationNotFound(instruction.operation_id)
                    }
                    other => BridgeError::Repository(other),
                })?;
            if operation.status.is_terminal() {
                return Err(BridgeError::InvalidTransition {
                    operation_id: operation.id,
                    status: operation.status,
                });
            }
            transitions.push(OperationTransition::from(instruction));
        }

        let updated = self
            .operations
            .apply_transitions(&transitions, &self.timestamp())
            .await?;

        // Failure refunds: return escrowed value to the initiator. A
        // completed operation keeps its escrow locked as backing for what
        // the counter domain released.
        for operation in &updated {
            if operation.status == OperationStatus::Failed {
                self.refund(operation).await?;
            }
        }

        Ok(updated)
    }

    async fn refund(&self, operation: &Operation) -> Result<(), BridgeError> {
        match (operation.operation_type, operation.value) {
            (OperationType::TokenDeposit, BridgeValue::Quantity(amount)) => {
                self.ledger
                    .refund_from_escrow(&operation.sender, amount)
                    .await?
            }
            (OperationType::TokenWithdrawal, BridgeValue::Quantity(amount)) => {
                self.ledger.credit(&operation.sender, amount).await.map(|_| ())?
            }
            (OperationType::RecordBridge, BridgeValue::Record(record_id)) => {
                self.ledger.unlock_record(record_id).await?
            }
            (operation_type, value) => {
                return Err(BridgeError::Internal(format!(
                    "operation {} mixes type {} with value {:?}",
                    operation.id, operation_type, value
                )))
            }
        }
        info!("Operation {} failed, escrow refunded", operation.id);
        Ok(())
    }
}
