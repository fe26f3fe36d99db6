//! Application state initialization
//!
//! Builds the repository graph, seeds role membership and the endpoint
//! allowlist from the configuration file, and wires the bridge service and
//! relay processor into the shared application state.
use std::sync::Arc;

use actix_web::web;
use color_eyre::Result;

use crate::{
    config::BridgeConfigFile,
    domain::{AccessControl, BridgeService, RelayProcessor, StatsAggregator},
    events::InProcessEventBus,
    models::{AppState, Role},
    repositories::{
        InMemoryLedger, InMemoryMessageRegistry, InMemoryOperationRepository,
        InMemoryOperationSequence, InMemoryRetryableConfigRepository,
    },
    utils::SystemClock,
};

/// Initializes application state from the validated configuration file.
pub fn initialize_app_state(config: &BridgeConfigFile) -> Result<web::ThinData<AppState>> {
    let operations = Arc::new(InMemoryOperationRepository::new());
    let sequence = Arc::new(InMemoryOperationSequence::new());
    let registry = Arc::new(InMemoryMessageRegistry::new());
    let configs = Arc::new(InMemoryRetryableConfigRepository::new());
    let ledger = Arc::new(InMemoryLedger::new());
    let stats = Arc::new(StatsAggregator::new());
    let event_bus = Arc::new(InProcessEventBus::new());
    let clock = Arc::new(SystemClock);

    let access = Arc::new(AccessControl::new());
    for admin in &config.bridge.admins {
        access.grant_role(*admin, Role::Admin);
    }
    for operator in &config.bridge.operators {
        access.grant_role(*operator, Role::Operator);
    }
    for relayer in &config.bridge.relayers {
        access.grant_role(*relayer, Role::Relayer);
    }
    for endpoint in &config.bridge.authorized_endpoints {
        access.authorize_endpoint(*endpoint);
    }

    let policy = config.policy();
    let bridge = Arc::new(BridgeService::new(
        operations.clone(),
        sequence,
        registry.clone(),
        configs,
        ledger.clone(),
        access.clone(),
        stats,
        event_bus.clone(),
        clock.clone(),
        policy.clone(),
    ));
    let processor = Arc::new(RelayProcessor::new(
        operations,
        registry,
        ledger,
        access,
        event_bus.clone(),
        clock,
        policy,
    ));

    Ok(web::ThinData(AppState {
        bridge,
        processor,
        event_bus,
    }))
}
