//! # Config Controller
//!
//! Read and operator-gated update of per-operation-type retryable
//! economics.
use actix_web::{web, HttpResponse};

use crate::models::{
    AccountId, ApiError, ApiResponse, AppState, OperationType, RetryableConfigUpdateRequest,
};

fn parse_operation_type(value: &str) -> Result<OperationType, ApiError> {
    value
        .parse()
        .map_err(|e: String| ApiError::BadRequest(e))
}

pub async fn get_config(
    operation_type: String,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let operation_type = parse_operation_type(&operation_type)?;
    let config = state.bridge.get_config(operation_type).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(config)))
}

pub async fn update_config(
    caller: AccountId,
    operation_type: String,
    request: RetryableConfigUpdateRequest,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let operation_type = parse_operation_type(&operation_type)?;
    let updated = state
        .bridge
        .update_config(caller, operation_type, request)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(updated)))
}
