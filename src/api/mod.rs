//! HTTP API surface: route definitions and their controllers.
pub mod controllers;
pub mod routes;

use actix_web::HttpRequest;

use crate::{
    constants::CALLER_ID_HEADER,
    models::{AccountId, ApiError},
};

/// Extracts the authenticated caller identity forwarded by the gateway.
///
/// Identity verification (signatures, sessions) happens upstream; this
/// service trusts the gateway-populated header and only enforces roles.
pub fn caller_from_request(req: &HttpRequest) -> Result<AccountId, ApiError> {
    let header = req
        .headers()
        .get(CALLER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized(format!("Missing {} header", CALLER_ID_HEADER)))?;
    header
        .trim()
        .parse()
        .map_err(|_| ApiError::Unauthorized(format!("Invalid {} header", CALLER_ID_HEADER)))
}
