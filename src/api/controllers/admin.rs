//! # Admin Controller
//!
//! Role-gated administrative endpoints: pause switch, role and endpoint
//! management, domain ledger crediting, emergency recovery and the audit
//! log read surface.
use actix_web::{web, HttpResponse};
use log::warn;

use crate::models::{
    AccountId, ApiError, ApiResponse, AppState, CreditRequest, EmergencyWithdrawRequest,
    EndpointRequest, PaginationMeta, PaginationQuery, PauseStateResponse, RegisterRecordRequest,
    RoleRequest,
};

pub async fn pause(
    caller: AccountId,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    state.bridge.pause(caller).await?;
    warn!("Bridge paused by {}", caller);
    Ok(HttpResponse::Ok().json(ApiResponse::success(PauseStateResponse { paused: true })))
}

pub async fn unpause(
    caller: AccountId,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    state.bridge.unpause(caller).await?;
    warn!("Bridge unpaused by {}", caller);
    Ok(HttpResponse::Ok().json(ApiResponse::success(PauseStateResponse { paused: false })))
}

pub async fn get_pause_state(state: web::ThinData<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(PauseStateResponse {
        paused: state.bridge.is_paused(),
    })))
}

pub async fn grant_role(
    caller: AccountId,
    request: RoleRequest,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    state
        .bridge
        .grant_role(caller, request.account, request.role)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::no_data()))
}

pub async fn revoke_role(
    caller: AccountId,
    request: RoleRequest,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    state
        .bridge
        .revoke_role(caller, request.account, request.role)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::no_data()))
}

pub async fn authorize_endpoint(
    caller: AccountId,
    request: EndpointRequest,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    state
        .bridge
        .authorize_endpoint(caller, request.endpoint)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::no_data()))
}

pub async fn revoke_endpoint(
    caller: AccountId,
    request: EndpointRequest,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    state
        .bridge
        .revoke_endpoint(caller, request.endpoint)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::no_data()))
}

pub async fn credit(
    caller: AccountId,
    request: CreditRequest,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let balance = state
        .bridge
        .credit(caller, request.account, request.amount)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(crate::models::BalanceResponse {
        account: request.account,
        balance,
    })))
}

pub async fn register_record(
    caller: AccountId,
    request: RegisterRecordRequest,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    state
        .bridge
        .register_record(caller, request.record_id, request.owner)
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::<()>::no_data()))
}

pub async fn emergency_withdraw(
    caller: AccountId,
    request: EmergencyWithdrawRequest,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    warn!(
        "Emergency withdrawal of {} to {} requested by {}",
        request.amount, request.to, caller
    );
    state.bridge.emergency_withdraw(caller, request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::no_data()))
}

pub async fn list_audit_log(
    query: PaginationQuery,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let offset = ((query.page.max(1) - 1) * query.per_page) as usize;
    let (entries, total) = state
        .event_bus
        .audit_log(offset, query.per_page as usize)
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::paginated(
        entries,
        PaginationMeta {
            total_items: total,
            current_page: query.page,
            per_page: query.per_page,
        },
    )))
}
