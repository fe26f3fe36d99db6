//! This module defines the HTTP routes for the participant-facing bridge
//! operations. Handlers extract the authenticated caller identity and
//! delegate to the bridge controller.
use actix_web::{get, post, web, HttpRequest, HttpResponse};

use crate::{
    api::{caller_from_request, controllers::bridge},
    models::{
        ApiError, ApiResponse, AppState, BalanceResponse, BridgeStats, DepositRequest,
        EscrowResponse, Operation, PaginationQuery, RecordBridgeRequest, WithdrawalRequest,
    },
};

/// Initiates a token deposit towards the counter domain.
///
/// The caller's funds move into the bridge escrow pool immediately; a relay
/// completion message later settles the operation.
#[utoipa::path(
    post,
    path = "/api/v1/bridge/deposits",
    tag = "Bridge",
    operation_id = "depositTokens",
    security(("api_key" = [])),
    request_body = DepositRequest,
    responses(
        (status = 201, description = "Deposit operation created", body = ApiResponse<Operation>),
        (status = 400, description = "Invalid recipient, amount or submission fee", body = ApiResponse<String>),
        (status = 401, description = "Unauthorized", body = ApiResponse<String>),
        (status = 503, description = "Bridge is paused", body = ApiResponse<String>),
    )
)]
#[post("/bridge/deposits")]
async fn deposit_tokens(
    req: HttpRequest,
    body: web::Json<DepositRequest>,
    data: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let caller = caller_from_request(&req)?;
    bridge::deposit_tokens(caller, body.into_inner(), data).await
}

/// Initiates a token withdrawal.
///
/// Burns the amount on this domain immediately and opens the dispute/delay
/// window; `finalizeWithdrawal` releases the funds once the window elapses.
#[utoipa::path(
    post,
    path = "/api/v1/bridge/withdrawals",
    tag = "Bridge",
    operation_id = "initiateWithdrawal",
    security(("api_key" = [])),
    request_body = WithdrawalRequest,
    responses(
        (status = 201, description = "Withdrawal operation created", body = ApiResponse<Operation>),
        (status = 400, description = "Invalid recipient, amount or submission fee", body = ApiResponse<String>),
        (status = 409, description = "Withdrawal delay not met", body = ApiResponse<String>),
        (status = 503, description = "Bridge is paused", body = ApiResponse<String>),
    )
)]
#[post("/bridge/withdrawals")]
async fn initiate_withdrawal(
    req: HttpRequest,
    body: web::Json<WithdrawalRequest>,
    data: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let caller = caller_from_request(&req)?;
    bridge::initiate_withdrawal(caller, body.into_inner(), data).await
}

/// Finalizes a withdrawal whose delay window has elapsed.
#[utoipa::path(
    post,
    path = "/api/v1/bridge/withdrawals/{operation_id}/finalize",
    tag = "Bridge",
    operation_id = "finalizeWithdrawal",
    security(("api_key" = [])),
    params(
        ("operation_id" = u64, Path, description = "The withdrawal operation to finalize")
    ),
    responses(
        (status = 200, description = "Withdrawal finalized", body = ApiResponse<Operation>),
        (status = 404, description = "Operation not found", body = ApiResponse<String>),
        (status = 409, description = "Delay window still open or operation already terminal", body = ApiResponse<String>),
    )
)]
#[post("/bridge/withdrawals/{operation_id}/finalize")]
async fn finalize_withdrawal(
    operation_id: web::Path<u64>,
    data: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    bridge::finalize_withdrawal(operation_id.into_inner(), data).await
}

/// Initiates a record bridge towards the counter domain.
///
/// The record moves into bridge custody immediately; the completion message
/// settles the equivalent record on the destination domain.
#[utoipa::path(
    post,
    path = "/api/v1/bridge/records",
    tag = "Bridge",
    operation_id = "bridgeRecord",
    security(("api_key" = [])),
    request_body = RecordBridgeRequest,
    responses(
        (status = 201, description = "Record bridge operation created", body = ApiResponse<Operation>),
        (status = 400, description = "Record not held by caller or invalid input", body = ApiResponse<String>),
        (status = 503, description = "Bridge is paused", body = ApiResponse<String>),
    )
)]
#[post("/bridge/records")]
async fn bridge_record(
    req: HttpRequest,
    body: web::Json<RecordBridgeRequest>,
    data: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let caller = caller_from_request(&req)?;
    bridge::bridge_record(caller, body.into_inner(), data).await
}

/// Retrieves one operation by id.
#[utoipa::path(
    get,
    path = "/api/v1/bridge/operations/{operation_id}",
    tag = "Bridge",
    operation_id = "getOperation",
    security(("api_key" = [])),
    params(
        ("operation_id" = u64, Path, description = "The operation to fetch")
    ),
    responses(
        (status = 200, description = "Operation retrieved", body = ApiResponse<Operation>),
        (status = 404, description = "Operation not found", body = ApiResponse<String>),
    )
)]
#[get("/bridge/operations/{operation_id}")]
async fn get_operation(
    operation_id: web::Path<u64>,
    data: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    bridge::get_operation(operation_id.into_inner(), data).await
}

/// Lists the operations initiated by an account, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/bridge/accounts/{account}/operations",
    tag = "Bridge",
    operation_id = "listUserOperations",
    security(("api_key" = [])),
    params(
        ("account" = String, Path, description = "Initiating account id"),
        ("page" = Option<u32>, Query, description = "Page number for pagination (starts at 1)"),
        ("per_page" = Option<u32>, Query, description = "Number of items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Operation list retrieved", body = ApiResponse<Vec<Operation>>),
        (status = 400, description = "Invalid account id", body = ApiResponse<String>),
    )
)]
#[get("/bridge/accounts/{account}/operations")]
async fn list_user_operations(
    account: web::Path<String>,
    query: web::Query<PaginationQuery>,
    data: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    bridge::list_user_operations(account.into_inner(), query.into_inner(), data).await
}

/// Retrieves an account's domain balance.
#[utoipa::path(
    get,
    path = "/api/v1/bridge/accounts/{account}/balance",
    tag = "Bridge",
    operation_id = "getBalance",
    security(("api_key" = [])),
    params(
        ("account" = String, Path, description = "Account id")
    ),
    responses(
        (status = 200, description = "Balance retrieved", body = ApiResponse<BalanceResponse>),
        (status = 400, description = "Invalid account id", body = ApiResponse<String>),
    )
)]
#[get("/bridge/accounts/{account}/balance")]
async fn get_balance(
    account: web::Path<String>,
    data: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    bridge::get_balance(account.into_inner(), data).await
}

/// Retrieves aggregate bridge statistics.
#[utoipa::path(
    get,
    path = "/api/v1/bridge/stats",
    tag = "Bridge",
    operation_id = "getStats",
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Statistics retrieved", body = ApiResponse<BridgeStats>),
    )
)]
#[get("/bridge/stats")]
async fn get_stats(data: web::ThinData<AppState>) -> Result<HttpResponse, ApiError> {
    bridge::get_stats(data).await
}

/// Retrieves the escrow pool and collected fee totals.
#[utoipa::path(
    get,
    path = "/api/v1/bridge/escrow",
    tag = "Bridge",
    operation_id = "getEscrow",
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Escrow totals retrieved", body = ApiResponse<EscrowResponse>),
    )
)]
#[get("/bridge/escrow")]
async fn get_escrow(data: web::ThinData<AppState>) -> Result<HttpResponse, ApiError> {
    bridge::get_escrow(data).await
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(deposit_tokens)
        .service(initiate_withdrawal)
        .service(finalize_withdrawal)
        .service(bridge_record)
        .service(get_operation)
        .service(list_user_operations)
        .service(get_balance)
        .service(get_stats)
        .service(get_escrow);
}
