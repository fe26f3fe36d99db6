//! # Repository Module
//!
//! Implements the data persistence layer for the bridge relay service using
//! the Repository pattern. All authoritative state (operations, consumed
//! messages, retryable economics, domain asset custody) lives behind these
//! traits; in-memory implementations back the service and its tests.

mod ledger;
pub use ledger::*;

mod message_registry;
pub use message_registry::*;

mod operation;
pub use operation::*;

mod retryable_config;
pub use retryable_config::*;

mod sequence;
pub use sequence::*;

#[derive(Debug)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}
