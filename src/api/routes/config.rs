//! This module defines the HTTP routes for retryable configuration.
use actix_web::{get, put, web, HttpRequest, HttpResponse};

use crate::{
    api::{caller_from_request, controllers::config},
    models::{ApiError, ApiResponse, AppState, RetryableConfig, RetryableConfigUpdateRequest},
};

/// Retrieves the retryable economics for one operation type.
#[utoipa::path(
    get,
    path = "/api/v1/bridge/configs/{operation_type}",
    tag = "Configuration",
    operation_id = "getConfig",
    security(("api_key" = [])),
    params(
        ("operation_type" = String, Path, description = "TOKEN_DEPOSIT, TOKEN_WITHDRAWAL or RECORD_BRIDGE")
    ),
    responses(
        (status = 200, description = "Configuration retrieved", body = ApiResponse<RetryableConfig>),
        (status = 400, description = "Unknown operation type", body = ApiResponse<String>),
    )
)]
#[get("/bridge/configs/{operation_type}")]
async fn get_config(
    operation_type: web::Path<String>,
    data: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    config::get_config(operation_type.into_inner(), data).await
}

/// Replaces the retryable economics for one operation type.
///
/// Requires the OPERATOR role. The fee multiplier is capped at 200% and the
/// retry window at 30 days.
#[utoipa::path(
    put,
    path = "/api/v1/bridge/configs/{operation_type}",
    tag = "Configuration",
    operation_id = "updateConfig",
    security(("api_key" = [])),
    params(
        ("operation_type" = String, Path, description = "TOKEN_DEPOSIT, TOKEN_WITHDRAWAL or RECORD_BRIDGE")
    ),
    request_body = RetryableConfigUpdateRequest,
    responses(
        (status = 200, description = "Configuration updated", body = ApiResponse<RetryableConfig>),
        (status = 400, description = "Multiplier or retry window out of bounds", body = ApiResponse<String>),
        (status = 403, description = "Caller is not an operator", body = ApiResponse<String>),
    )
)]
#[put("/bridge/configs/{operation_type}")]
async fn update_config(
    req: HttpRequest,
    operation_type: web::Path<String>,
    body: web::Json<RetryableConfigUpdateRequest>,
    data: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let caller = caller_from_request(&req)?;
    config::update_config(caller, operation_type.into_inner(), body.into_inner(), data).await
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(get_config).service(update_config);
}
