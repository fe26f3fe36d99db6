//! The bridge's public contract: initiating flows, withdrawal finalization,
//! configuration and administration.
//!
//! Every mutating method performs its permission check first and leaves all
//! state untouched on any rejection. Escrow always moves at initiation:
//! deposits debit into the pool, withdrawals burn, records lock. The relay
//! processor is the only other writer of operation state.
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use log::info;

use crate::{
    constants::{MAX_FEE_MULTIPLIER, MAX_RETRY_WINDOW_SECS},
    domain::{AccessControl, StatsAggregator},
    events::{BridgeEvent, EventPublisherTrait},
    models::{
        AccountId, BridgeError, BridgeStats, BridgeValue, DepositRequest, EmergencyWithdrawRequest,
        EscrowResponse, MessageId, Operation, OperationStatus, OperationTransition, OperationType,
        PaginationQuery, RecordBridgeRequest, RepositoryError, RetryableConfig,
        RetryableConfigUpdateRequest, Role, TransitionOutcome, WithdrawalRequest,
    },
    repositories::{
        LedgerTrait, MessageRegistryTrait, OperationRepositoryTrait, OperationSequenceTrait,
        PaginatedResult, RetryableConfigRepositoryTrait,
    },
    utils::{parse_timestamp, Clock},
};

/// Policy knobs resolved from the configuration file at startup.
#[derive(Debug, Clone)]
pub struct BridgePolicy {
    /// Dispute/delay window between initiating and finalizing a withdrawal,
    /// also the per-sender initiation rate limit.
    pub withdrawal_delay_secs: u64,
    /// Whether completion messages for already-escrowed operations keep
    /// draining while the bridge is paused.
    pub drain_while_paused: bool,
}

impl Default for BridgePolicy {
    fn default() -> Self {
        Self {
            withdrawal_delay_secs: crate::constants::DEFAULT_WITHDRAWAL_DELAY_SECS,
            drain_while_paused: true,
        }
    }
}

pub struct BridgeService {
    operations: Arc<dyn OperationRepositoryTrait>,
    sequence: Arc<dyn OperationSequenceTrait>,
    registry: Arc<dyn MessageRegistryTrait>,
    configs: Arc<dyn RetryableConfigRepositoryTrait>,
    ledger: Arc<dyn LedgerTrait>,
    access: Arc<AccessControl>,
    stats: Arc<StatsAggregator>,
    events: Arc<dyn EventPublisherTrait>,
    clock: Arc<dyn Clock>,
    policy: BridgePolicy,
    last_withdrawal: DashMap<AccountId, DateTime<Utc>>,
}

impl BridgeService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        operations: Arc<dyn OperationRepositoryTrait>,
        sequence: Arc<dyn OperationSequenceTrait>,
        registry: Arc<dyn MessageRegistryTrait>,
        configs: Arc<dyn RetryableConfigRepositoryTrait>,
        ledger: Arc<dyn LedgerTrait>,
        access: Arc<AccessControl>,
        stats: Arc<StatsAggregator>,
        events: Arc<dyn EventPublisherTrait>,
        clock: Arc<dyn Clock>,
        policy: BridgePolicy,
    ) -> Self {
        Self {
            operations,
            sequence,
            registry,
            configs,
            ledger,
            access,
            stats,
            events,
            clock,
            policy,
            last_withdrawal: DashMap::new(),
        }
    }

    pub fn policy(&self) -> &BridgePolicy {
        &self.policy
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

    /// Rejects initiations whose attached value does not cover the priced
    /// submission cost for this payload.
    async fn require_submission_fee(
        &self,
        operation_type: OperationType,
        payload_size: usize,
        attached: u128,
    ) -> Result<(), BridgeError> {
        let config = self.configs.get(operation_type).await?;
        let required = config.estimate_cost(payload_size);
        if attached < required {
            return Err(BridgeError::InsufficientSubmissionCost { required, attached });
        }
        Ok(())
    }

    async fn create_operation(
        &self,
        sender: AccountId,
        recipient: AccountId,
        value: BridgeValue,
        operation_type: OperationType,
    ) -> Result<Operation, BridgeError> {
        let id = self.sequence.next().await?;
        let operation = Operation {
            id,
            sender,
            recipient,
            value,
            operation_type,
            status: OperationStatus::Processing,
            status_reason: None,
            created_at: self.timestamp(),
            completed_at: None,
        };
        let operation = self.operations.create(operation).await?;
        self.stats.record_initiated(&operation);
        self.publish(BridgeEvent::OperationInitiated {
            id: operation.id,
            sender: operation.sender,
            operation_type: operation.operation_type,
            value: operation.value,
        })
        .await?;
        info!(
            "Operation {} initiated: {} by {}",
            operation.id, operation.operation_type, operation.sender
        );
        Ok(operation)
    }

    /// Locks `amount` of the caller's funds into the bridge escrow pool and
    /// opens a deposit operation towards the counter domain.
    pub async fn deposit_tokens(
        &self,
        caller: AccountId,
        request: DepositRequest,
    ) -> Result<Operation, BridgeError> {
        self.access.require_not_paused()?;
        if request.recipient.is_zero() {
            return Err(BridgeError::InvalidRecipient);
        }
        if request.amount == 0 {
            return Err(BridgeError::ZeroAmount);
        }
        let payload_size = request.extra_data.as_deref().map_or(0, str::len);
        self.require_submission_fee(OperationType::TokenDeposit, payload_size, request.submission_fee)
            .await?;

        self.ledger
            .debit_to_escrow(&caller, request.amount)
            .await
            .map_err(|e| match e {
                RepositoryError::ConstraintViolation(_) => BridgeError::InsufficientBalance(caller),
                other => BridgeError::Repository(other),
            })?;
        self.ledger.collect_fee(request.submission_fee).await?;

        self.create_operation(
            caller,
            request.recipient,
            BridgeValue::Quantity(request.amount),
            OperationType::TokenDeposit,
        )
        .await
    }

    /// Burns `amount` on this domain immediately and opens a withdrawal
    /// operation. Initiations per sender are rate-limited to one per delay
    /// window.
    pub async fn initiate_withdrawal(
        &self,
        caller: AccountId,
        request: WithdrawalRequest,
    ) -> Result<Operation, BridgeError> {
        self.access.require_not_paused()?;
        if request.recipient.is_zero() {
            return Err(BridgeError::InvalidRecipient);
        }
        if request.amount == 0 {
            return Err(BridgeError::ZeroAmount);
        }
        self.require_submission_fee(OperationType::TokenWithdrawal, 0, request.submission_fee)
            .await?;

        let now = self.clock.now();
        let delay = Duration::seconds(self.policy.withdrawal_delay_secs as i64);

        // Claim the sender's withdrawal window before moving funds. The
        // entry guard makes the check-and-set atomic against concurrent
        // initiations from the same sender.
        let previous = match self.last_withdrawal.entry(caller) {
            Entry::Occupied(mut entry) => {
                if now < *entry.get() + delay {
                    return Err(BridgeError::WithdrawalDelayNotMet);
                }
                let previous = Some(*entry.get());
                entry.insert(now);
                previous
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
                None
            }
        };

        if let Err(e) = self.ledger.burn(&caller, request.amount).await {
            // Give the claimed window back; nothing was burned.
            match previous {
                Some(at) => {
                    self.last_withdrawal.insert(caller, at);
                }
                None => {
                    self.last_withdrawal.remove(&caller);
                }
            }
            return Err(match e {
                RepositoryError::ConstraintViolation(_) => BridgeError::InsufficientBalance(caller),
                other => BridgeError::Repository(other),
            });
        }
        self.ledger.collect_fee(request.submission_fee).await?;

        self.create_operation(
            caller,
            request.recipient,
            BridgeValue::Quantity(request.amount),
            OperationType::TokenWithdrawal,
        )
        .await
    }

    /// Completes a withdrawal once its delay window has elapsed, releasing
    /// the funds on the counter domain. Callable while paused: the burn
    /// already happened at initiation.
    pub async fn finalize_withdrawal(&self, operation_id: u64) -> Result<Operation, BridgeError> {
        let operation = self.get_operation(operation_id).await?;
        if operation.operation_type != OperationType::TokenWithdrawal {
            return Err(BridgeError::NotAWithdrawal(operation_id));
        }
        if operation.status.is_terminal() {
            return Err(BridgeError::InvalidTransition {
                operation_id,
                status: operation.status,
            });
        }

        let created_at = parse_timestamp(&operation.created_at)
            .map_err(|e| BridgeError::Internal(format!("corrupt created_at: {}", e)))?;
        let delay = Duration::seconds(self.policy.withdrawal_delay_secs as i64);
        if self.clock.now() < created_at + delay {
            return Err(BridgeError::WithdrawalDelayNotMet);
        }

        let transition = OperationTransition {
            operation_id,
            outcome: TransitionOutcome::Complete,
        };
        let updated = self
            .operations
            .apply_transitions(std::slice::from_ref(&transition), &self.timestamp())
            .await;
        let operation = match updated {
            Ok(mut operations) => operations.remove(0),
            // Lost a race against a relay completion; surface the terminal
            // state rather than a storage error.
            Err(RepositoryError::ConstraintViolation(_)) => {
                let current = self.get_operation(operation_id).await?;
                return Err(BridgeError::InvalidTransition {
                    operation_id,
                    status: current.status,
                });
            }
            Err(other) => return Err(other.into()),
        };

        self.publish(BridgeEvent::OperationCompleted { id: operation_id })
            .await?;
        info!("Withdrawal {} finalized after delay window", operation_id);
        Ok(operation)
    }

    /// Takes a record into bridge custody and opens a record-bridge
    /// operation towards the counter domain.
    pub async fn bridge_record(
        &self,
        caller: AccountId,
        request: RecordBridgeRequest,
    ) -> Result<Operation, BridgeError> {
        self.access.require_not_paused()?;
        if request.recipient.is_zero() {
            return Err(BridgeError::InvalidRecipient);
        }
        let payload_size = request.metadata.as_deref().map_or(0, str::len);
        self.require_submission_fee(OperationType::RecordBridge, payload_size, request.submission_fee)
            .await?;

        self.ledger
            .lock_record(request.record_id, &caller)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound(_) | RepositoryError::ConstraintViolation(_) => {
                    BridgeError::RecordNotOwned {
                        record_id: request.record_id,
                        account: caller,
                    }
                }
                other => BridgeError::Repository(other),
            })?;
        self.ledger.collect_fee(request.submission_fee).await?;

        self.create_operation(
            caller,
            request.recipient,
            BridgeValue::Record(request.record_id),
            OperationType::RecordBridge,
        )
        .await
    }

    // --- administration ---

    pub async fn pause(&self, caller: AccountId) -> Result<(), BridgeError> {
        self.access.require_role(&caller, Role::Admin)?;
        self.access.pause();
        self.publish(BridgeEvent::BridgePaused).await?;
        Ok(())
    }

    pub async fn unpause(&self, caller: AccountId) -> Result<(), BridgeError> {
        self.access.require_role(&caller, Role::Admin)?;
        self.access.unpause();
        self.publish(BridgeEvent::BridgeUnpaused).await?;
        Ok(())
    }

    pub fn is_paused(&self) -> bool {
        self.access.is_paused()
    }

    pub async fn grant_role(
        &self,
        caller: AccountId,
        account: AccountId,
        role: Role,
    ) -> Result<(), BridgeError> {
        self.access.require_role(&caller, Role::Admin)?;
        self.access.grant_role(account, role);
        self.publish(BridgeEvent::RoleGranted { account, role }).await
    }

    pub async fn revoke_role(
        &self,
        caller: AccountId,
        account: AccountId,
        role: Role,
    ) -> Result<(), BridgeError> {
        self.access.require_role(&caller, Role::Admin)?;
        self.access.revoke_role(&account, role);
        self.publish(BridgeEvent::RoleRevoked { account, role }).await
    }

    pub async fn authorize_endpoint(
        &self,
        caller: AccountId,
        endpoint: AccountId,
    ) -> Result<(), BridgeError> {
        self.access.require_role(&caller, Role::Operator)?;
        self.access.authorize_endpoint(endpoint);
        self.publish(BridgeEvent::EndpointAuthorized { endpoint })
            .await
    }

    pub async fn revoke_endpoint(
        &self,
        caller: AccountId,
        endpoint: AccountId,
    ) -> Result<(), BridgeError> {
        self.access.require_role(&caller, Role::Operator)?;
        self.access.revoke_endpoint(&endpoint);
        self.publish(BridgeEvent::EndpointRevoked { endpoint }).await
    }

    pub async fn update_config(
        &self,
        caller: AccountId,
        operation_type: OperationType,
        request: RetryableConfigUpdateRequest,
    ) -> Result<RetryableConfig, BridgeError> {
        self.access.require_role(&caller, Role::Operator)?;
        if request.submission_fee_multiplier > MAX_FEE_MULTIPLIER {
            return Err(BridgeError::MultiplierTooHigh);
        }
        if request.max_retry_window_secs > MAX_RETRY_WINDOW_SECS {
            return Err(BridgeError::RetryWindowTooLong);
        }
        let updated = self.configs.update(operation_type, request.into()).await?;
        self.publish(BridgeEvent::ConfigUpdated { operation_type })
            .await?;
        Ok(updated)
    }

    /// Gateway-observed inbound funds, operator-gated.
    pub async fn credit(
        &self,
        caller: AccountId,
        account: AccountId,
        amount: u128,
    ) -> Result<u128, BridgeError> {
        self.access.require_role(&caller, Role::Operator)?;
        if amount == 0 {
            return Err(BridgeError::ZeroAmount);
        }
        Ok(self.ledger.credit(&account, amount).await?)
    }

    /// Gateway-observed inbound record, operator-gated.
    pub async fn register_record(
        &self,
        caller: AccountId,
        record_id: u64,
        owner: AccountId,
    ) -> Result<(), BridgeError> {
        self.access.require_role(&caller, Role::Operator)?;
        self.ledger
            .register_record(record_id, &owner)
            .await
            .map_err(|e| match e {
                RepositoryError::ConstraintViolation(_) => {
                    BridgeError::RecordAlreadyRegistered(record_id)
                }
                other => BridgeError::Repository(other),
            })
    }

    /// Admin escape hatch for stuck escrow. Bypasses the operation ledger
    /// entirely and is audited as its own event kind.
    pub async fn emergency_withdraw(
        &self,
        caller: AccountId,
        request: EmergencyWithdrawRequest,
    ) -> Result<(), BridgeError> {
        self.access.require_role(&caller, Role::Admin)?;
        if request.to.is_zero() {
            return Err(BridgeError::InvalidRecipient);
        }
        if request.amount == 0 {
            return Err(BridgeError::ZeroAmount);
        }
        self.ledger
            .emergency_withdraw(&request.to, request.amount)
            .await
            .map_err(|e| match e {
                RepositoryError::ConstraintViolation(_) => BridgeError::InsufficientEscrow,
                other => BridgeError::Repository(other),
            })?;
        self.publish(BridgeEvent::EmergencyWithdrawal {
            to: request.to,
            amount: request.amount,
        })
        .await?;
        Ok(())
    }

    // --- reads ---

    pub async fn get_operation(&self, id: u64) -> Result<Operation, BridgeError> {
        self.operations.get_by_id(id).await.map_err(|e| match e {
            RepositoryError::NotFound(_) => BridgeError::OperationNotFound(id),
            other => BridgeError::Repository(other),
        })
    }

    pub async fn list_by_user(
        &self,
        account: &AccountId,
        query: PaginationQuery,
    ) -> Result<PaginatedResult<Operation>, BridgeError> {
        Ok(self.operations.list_by_user(account, query).await?)
    }

    pub fn stats(&self) -> BridgeStats {
        self.stats.snapshot()
    }

    pub async fn is_message_processed(&self, id: &MessageId) -> Result<bool, BridgeError> {
        Ok(self.registry.is_processed(id).await?)
    }

    pub async fn get_config(
        &self,
        operation_type: OperationType,
    ) -> Result<RetryableConfig, BridgeError> {
        Ok(self.configs.get(operation_type).await?)
    }

    pub async fn balance_of(&self, account: &AccountId) -> Result<u128, BridgeError> {
        Ok(self.ledger.balance_of(account).await?)
    }

    pub async fn escrow_info(&self) -> Result<EscrowResponse, BridgeError> {
        Ok(EscrowResponse {
            escrow_pool: self.ledger.escrow_pool().await?,
            collected_fees: self.ledger.collected_fees().await?,
        })
    }
}
