//! Bridge configuration file loading.
//!
//! A JSON file seeds the policy knobs, the initial role memberships and
//! the authorized counter-domain endpoints. Role membership can be changed
//! at runtime through the admin API; the file only provides the bootstrap
//! set so the service never starts without an admin.
use std::fs;

use serde::Deserialize;
use thiserror::Error;

use crate::{constants::DEFAULT_WITHDRAWAL_DELAY_SECS, domain::BridgePolicy, models::AccountId};

#[derive(Error, Debug)]
pub enum ConfigFileError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfigFile {
    pub bridge: BridgeSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BridgeSection {
    #[serde(default = "default_withdrawal_delay")]
    pub withdrawal_delay_secs: u64,
    #[serde(default = "default_drain_while_paused")]
    pub drain_while_paused: bool,
    pub admins: Vec<AccountId>,
    #[serde(default)]
    pub operators: Vec<AccountId>,
    #[serde(default)]
    pub relayers: Vec<AccountId>,
    #[serde(default)]
    pub authorized_endpoints: Vec<AccountId>,
}

fn default_withdrawal_delay() -> u64 {
    DEFAULT_WITHDRAWAL_DELAY_SECS
}

fn default_drain_while_paused() -> bool {
    true
}

impl BridgeConfigFile {
    pub fn validate(&self) -> Result<(), ConfigFileError> {
        if self.bridge.admins.is_empty() {
            return Err(ConfigFileError::InvalidConfig(
                "at least one admin account is required".to_string(),
            ));
        }
        let all_accounts = self
            .bridge
            .admins
            .iter()
            .chain(&self.bridge.operators)
            .chain(&self.bridge.relayers)
            .chain(&self.bridge.authorized_endpoints);
        for account in all_accounts {
            if account.is_zero() {
                return Err(ConfigFileError::InvalidConfig(
                    "the zero account cannot hold a role or endpoint".to_string(),
                ));
            }
        }
        if self.bridge.withdrawal_delay_secs == 0 {
            return Err(ConfigFileError::InvalidConfig(
                "withdrawal delay must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn policy(&self) -> BridgePolicy {
        BridgePolicy {
            withdrawal_delay_secs: self.bridge.withdrawal_delay_secs,
            drain_while_paused: self.bridge.drain_while_paused,
        }
    }
}

/// Loads and validates the bridge configuration file.
pub fn load_config(config_file_path: &str) -> Result<BridgeConfigFile, ConfigFileError> {
    let contents = fs::read_to_string(config_file_path)?;
    let config: BridgeConfigFile = serde_json::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}
