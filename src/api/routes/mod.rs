//! # API Routes Module
//!
//! Configures HTTP routes for the bridge relay service API.
//!
//! ## Routes
//!
//! * `/health` - Health check endpoint
//! * `/bridge` - Initiating flows and the operation/stats read surface
//! * `/bridge/messages` - Relay completion message submission
//! * `/bridge/configs` - Retryable economics per operation type
//! * `/bridge/admin` - Pause switch, roles, endpoints, recovery, audit log

pub mod admin;
pub mod bridge;
pub mod config;
pub mod health;
pub mod message;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::init)
        .configure(bridge::init)
        .configure(message::init)
        .configure(config::init)
        .configure(admin::init);
}
