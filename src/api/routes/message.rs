//! This module defines the HTTP routes for relay message submission and
//! the processed-state read surface.
use actix_web::{get, post, web, HttpRequest, HttpResponse};

use crate::{
    api::{caller_from_request, controllers::message},
    models::{
        ApiError, ApiResponse, AppState, MessageStatusResponse, Operation, ProcessMessageRequest,
    },
};

/// Submits a relay completion message.
///
/// Requires the RELAYER role and an allowlisted source endpoint. A message
/// id is consumed at most once, ever; duplicates fail with
/// `Message already processed`, which operators treat as success-equivalent.
#[utoipa::path(
    post,
    path = "/api/v1/bridge/messages",
    tag = "Messages",
    operation_id = "processMessage",
    security(("api_key" = [])),
    request_body = ProcessMessageRequest,
    responses(
        (status = 200, description = "Message applied, operations advanced", body = ApiResponse<Vec<Operation>>),
        (status = 400, description = "Malformed payload or unknown selector", body = ApiResponse<String>),
        (status = 403, description = "Caller is not a relayer or endpoint not authorized", body = ApiResponse<String>),
        (status = 409, description = "Message already processed", body = ApiResponse<String>),
    )
)]
#[post("/bridge/messages")]
async fn process_message(
    req: HttpRequest,
    body: web::Json<ProcessMessageRequest>,
    data: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let caller = caller_from_request(&req)?;
    message::process_message(caller, body.into_inner(), data).await
}

/// Reports whether a message id has been consumed.
#[utoipa::path(
    get,
    path = "/api/v1/bridge/messages/{message_id}",
    tag = "Messages",
    operation_id = "isMessageProcessed",
    security(("api_key" = [])),
    params(
        ("message_id" = String, Path, description = "32-byte message id, hex encoded")
    ),
    responses(
        (status = 200, description = "Message status retrieved", body = ApiResponse<MessageStatusResponse>),
        (status = 400, description = "Invalid message id", body = ApiResponse<String>),
    )
)]
#[get("/bridge/messages/{message_id}")]
async fn get_message_status(
    message_id: web::Path<String>,
    data: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    message::get_message_status(message_id.into_inner(), data).await
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(process_message).service(get_message_status);
}
