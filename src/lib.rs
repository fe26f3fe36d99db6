//! # Bridge Relayer
//!
//! A cross-domain bridge relay service. Two independently operated ledger
//! domains exchange fungible value and transferable records through an
//! off-chain relay; this service is the authoritative ledger for those
//! operations. It records a pending operation the moment a participant
//! initiates a transfer, escrows the value immediately, and applies
//! relay-delivered completion messages exactly once.
//!
//! ## Features
//!
//! - Append-only operation ledger with terminal-state transitions
//! - Exactly-once relay message consumption
//! - Dispute/delay windows and per-type retryable economics
//! - Role-gated administration with a global pause switch
//! - REST API
//!
//! ## Module Structure
//!
//! - `api`: HTTP routes and controllers
//! - `config`: Environment and file-based configuration
//! - `domain`: Bridge service, relay processor, access control
//! - `events`: Audit log and in-process event broadcast
//! - `logging`: Logging setup
//! - `models`: Wire and storage data structures
//! - `repositories`: Trait-backed state stores
//! - `utils`: Clock and shared helpers

pub mod api;
pub mod config;
pub mod constants;
pub mod domain;
pub mod events;
pub mod init;
pub mod logging;
pub mod models;
pub mod openapi;
pub mod repositories;
pub mod utils;

pub use models::{ApiError, AppState};
