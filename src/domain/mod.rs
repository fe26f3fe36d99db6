//! Core business logic: access control, the bridge's initiating flows and
//! the relay message processor.
mod access;
pub use access::*;

mod stats;
pub use stats::*;

mod bridge;
pub use bridge::*;

mod processor;
pub use processor::*;

#[cfg(test)]
pub(crate) mod test_support;
