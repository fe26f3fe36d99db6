//! This module contains all the constant values used in the system
mod bridge;
pub use bridge::*;

mod authorization;
pub use authorization::*;
