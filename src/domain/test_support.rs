//! Shared wiring for domain-level tests: a full service graph over the
//! in-memory repositories with a manually driven clock.
use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::{
    domain::{AccessControl, BridgePolicy, BridgeService, RelayProcessor, StatsAggregator},
    events::InProcessEventBus,
    models::{AccountId, DepositRequest, Role, WithdrawalRequest},
    repositories::{
        InMemoryLedger, InMemoryMessageRegistry, InMemoryOperationRepository,
        InMemoryOperationSequence, InMemoryRetryableConfigRepository,
    },
    utils::ManualClock,
};

/// Default-config estimate for a zero-byte payload:
/// base 10^16 scaled by the 120% multiplier.
pub(crate) const FEE: u128 = 12_000_000_000_000_000;

pub(crate) fn account(n: u8) -> AccountId {
    let mut bytes = [0u8; 20];
    bytes[19] = n;
    AccountId::new(bytes)
}

pub(crate) fn admin() -> AccountId {
    account(250)
}

pub(crate) fn operator() -> AccountId {
    account(251)
}

pub(crate) fn relayer() -> AccountId {
    account(252)
}

pub(crate) fn endpoint() -> AccountId {
    account(253)
}

pub(crate) struct TestHarness {
    pub bridge: BridgeService,
    pub processor: RelayProcessor,
    pub access: Arc<AccessControl>,
    pub ledger: Arc<InMemoryLedger>,
    pub clock: Arc<ManualClock>,
    pub bus: Arc<InProcessEventBus>,
}

pub(crate) fn harness() -> TestHarness {
    harness_with_policy(BridgePolicy::default())
}

pub(crate) fn harness_with_policy(policy: BridgePolicy) -> TestHarness {
    let operations = Arc::new(InMemoryOperationRepository::new());
    let sequence = Arc::new(InMemoryOperationSequence::new());
    let registry = Arc::new(InMemoryMessageRegistry::new());
    let configs = Arc::new(InMemoryRetryableConfigRepository::new());
    let ledger = Arc::new(InMemoryLedger::new());
    let access = Arc::new(AccessControl::new());
    let stats = Arc::new(StatsAggregator::new());
    let bus = Arc::new(InProcessEventBus::new());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    ));

    access.grant_role(admin(), Role::Admin);
    access.grant_role(operator(), Role::Operator);
    access.grant_role(relayer(), Role::Relayer);
    access.authorize_endpoint(endpoint());

    let bridge = BridgeService::new(
        operations.clone(),
        sequence,
        registry.clone(),
        configs,
        ledger.clone(),
        access.clone(),
        stats,
        bus.clone(),
        clock.clone(),
        policy.clone(),
    );
    let processor = RelayProcessor::new(
        operations,
        registry,
        ledger.clone(),
        access.clone(),
        bus.clone(),
        clock.clone(),
        policy,
    );

    TestHarness {
        bridge,
        processor,
        access,
        ledger,
        clock,
        bus,
    }
}

pub(crate) fn deposit_request(recipient: AccountId, amount: u128) -> DepositRequest {
    DepositRequest {
        recipient,
        amount,
        extra_data: None,
        submission_fee: FEE,
    }
}

pub(crate) fn withdrawal_request(recipient: AccountId, amount: u128) -> WithdrawalRequest {
    WithdrawalRequest {
        recipient,
        amount,
        submission_fee: FEE,
    }
}
