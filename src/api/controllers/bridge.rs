//! # Bridge Controller
//!
//! Handles the participant-facing bridge endpoints: initiating deposits,
//! withdrawals and record bridges, finalizing withdrawals, and the read
//! surface over operations, balances and statistics.
use actix_web::{web, HttpResponse};
use log::info;

use crate::models::{
    AccountId, ApiError, ApiResponse, AppState, DepositRequest, PaginationMeta, PaginationQuery,
    RecordBridgeRequest, WithdrawalRequest,
};

pub async fn deposit_tokens(
    caller: AccountId,
    request: DepositRequest,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let operation = state.bridge.deposit_tokens(caller, request).await?;
    info!("Deposit initiated: operation {}", operation.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(operation)))
}

pub async fn initiate_withdrawal(
    caller: AccountId,
    request: WithdrawalRequest,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let operation = state.bridge.initiate_withdrawal(caller, request).await?;
    info!("Withdrawal initiated: operation {}", operation.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(operation)))
}

pub async fn finalize_withdrawal(
    operation_id: u64,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let operation = state.bridge.finalize_withdrawal(operation_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(operation)))
}

pub async fn bridge_record(
    caller: AccountId,
    request: RecordBridgeRequest,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let operation = state.bridge.bridge_record(caller, request).await?;
    info!("Record bridge initiated: operation {}", operation.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(operation)))
}

pub async fn get_operation(
    operation_id: u64,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let operation = state.bridge.get_operation(operation_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(operation)))
}

pub async fn list_user_operations(
    account: String,
    query: PaginationQuery,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let account: AccountId = account
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid account id: {}", account)))?;
    let operations = state.bridge.list_by_user(&account, query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::paginated(
        operations.items,
        PaginationMeta {
            total_items: operations.total,
            current_page: operations.page,
            per_page: operations.per_page,
        },
    )))
}

pub async fn get_balance(
    account: String,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let account: AccountId = account
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid account id: {}", account)))?;
    let balance = state.bridge.balance_of(&account).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        crate::models::BalanceResponse { account, balance },
    )))
}

pub async fn get_stats(state: web::ThinData<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(state.bridge.stats())))
}

pub async fn get_escrow(state: web::ThinData<AppState>) -> Result<HttpResponse, ApiError> {
    let escrow = state.bridge.escrow_info().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(escrow)))
}
