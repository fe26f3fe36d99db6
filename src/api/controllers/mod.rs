//! Request handlers: permission-checked pass-through from the HTTP layer
//! to the domain services.
pub mod admin;
pub mod bridge;
pub mod config;
pub mod message;
