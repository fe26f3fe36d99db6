//! Header names used by the authentication and authorization layers.

/// Service-level API key, checked by the middleware in `main.rs`.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Authenticated domain account on whose behalf a request is made.
/// Identity verification happens upstream of this service; the gateway
/// forwards the verified account id in this header.
pub const CALLER_ID_HEADER: &str = "x-caller-id";
