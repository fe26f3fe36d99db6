//! Role-gated administrative surface and the global pause switch.
//!
//! Every mutating entry point starts with an explicit permission check
//! against these keyed sets; there is no implicit authority anywhere else.
//! Pausing is a coarse global gate over initiating calls only.
use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashSet;

use crate::models::{AccountId, BridgeError, Role};

#[derive(Debug, Default)]
pub struct AccessControl {
    roles: DashSet<(AccountId, Role)>,
    endpoints: DashSet<AccountId>,
    paused: AtomicBool,
}

impl AccessControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant_role(&self, account: AccountId, role: Role) -> bool {
        self.roles.insert((account, role))
    }

    pub fn revoke_role(&self, account: &AccountId, role: Role) -> bool {
        self.roles.remove(&(*account, role)).is_some()
    }

    pub fn has_role(&self, account: &AccountId, role: Role) -> bool {
        self.roles.contains(&(*account, role))
    }

    /// Permission gate invoked at the top of every role-gated entry point.
    pub fn require_role(&self, caller: &AccountId, role: Role) -> Result<(), BridgeError> {
        if self.has_role(caller, role) {
            Ok(())
        } else {
            Err(BridgeError::Unauthorized {
                caller: *caller,
                required: role,
            })
        }
    }

    pub fn authorize_endpoint(&self, endpoint: AccountId) -> bool {
        self.endpoints.insert(endpoint)
    }

    pub fn revoke_endpoint(&self, endpoint: &AccountId) -> bool {
        self.endpoints.remove(endpoint).is_some()
    }

    pub fn is_authorized_endpoint(&self, endpoint: &AccountId) -> bool {
        self.endpoints.contains(endpoint)
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub fn unpause(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Gate for initiating entry points.
    pub fn require_not_paused(&self) -> Result<(), BridgeError> {
        if self.is_paused() {
            Err(BridgeError::Paused)
        } else {
            Ok(())
        }
    }
}
