//! Configuration management: environment-driven server settings and the
//! JSON bridge configuration file.
mod bridge_config;
pub use bridge_config::*;

mod rate_limit;
pub use rate_limit::*;

mod server_config;
pub use server_config::*;
