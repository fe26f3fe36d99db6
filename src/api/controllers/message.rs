//! # Message Controller
//!
//! Handles relay-facing endpoints: completion message submission and the
//! processed-state read used by relay operators to decide whether a
//! redelivery is needed.
use actix_web::{web, HttpResponse};
use log::info;

use crate::models::{
    AccountId, ApiError, ApiResponse, AppState, MessageId, MessageStatusResponse,
    ProcessMessageRequest,
};

pub async fn process_message(
    caller: AccountId,
    request: ProcessMessageRequest,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let message_id = request.message_id;
    let operations = state.processor.process_message(caller, request).await?;
    info!(
        "Relay message {} advanced {} operation(s)",
        message_id,
        operations.len()
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(operations)))
}

pub async fn get_message_status(
    message_id: String,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let message_id: MessageId = message_id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid message id: {}", message_id)))?;
    let processed = state.bridge.is_message_processed(&message_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(MessageStatusResponse {
        message_id,
        processed,
    })))
}
