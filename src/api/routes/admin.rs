//! This module defines the HTTP routes for the administrative surface:
//! the pause switch, role and endpoint management, domain ledger
//! crediting, emergency recovery and the audit log.
use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};

use crate::{
    api::{caller_from_request, controllers::admin},
    models::{
        ApiError, ApiResponse, AppState, BalanceResponse, CreditRequest,
        EmergencyWithdrawRequest, EndpointRequest, PaginationQuery, PauseStateResponse,
        RegisterRecordRequest, RoleRequest,
    },
};

/// Halts all initiating entry points. In-flight relay messages keep
/// draining under the default policy. Requires the ADMIN role.
#[utoipa::path(
    post,
    path = "/api/v1/bridge/admin/pause",
    tag = "Administration",
    operation_id = "pause",
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Bridge paused", body = ApiResponse<PauseStateResponse>),
        (status = 403, description = "Caller is not an admin", body = ApiResponse<String>),
    )
)]
#[post("/bridge/admin/pause")]
async fn pause(req: HttpRequest, data: web::ThinData<AppState>) -> Result<HttpResponse, ApiError> {
    let caller = caller_from_request(&req)?;
    admin::pause(caller, data).await
}

/// Reopens the initiating entry points. Requires the ADMIN role.
#[utoipa::path(
    post,
    path = "/api/v1/bridge/admin/unpause",
    tag = "Administration",
    operation_id = "unpause",
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Bridge unpaused", body = ApiResponse<PauseStateResponse>),
        (status = 403, description = "Caller is not an admin", body = ApiResponse<String>),
    )
)]
#[post("/bridge/admin/unpause")]
async fn unpause(
    req: HttpRequest,
    data: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let caller = caller_from_request(&req)?;
    admin::unpause(caller, data).await
}

/// Reports the pause state.
#[utoipa::path(
    get,
    path = "/api/v1/bridge/admin/pause",
    tag = "Administration",
    operation_id = "getPauseState",
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Pause state retrieved", body = ApiResponse<PauseStateResponse>),
    )
)]
#[get("/bridge/admin/pause")]
async fn get_pause_state(data: web::ThinData<AppState>) -> Result<HttpResponse, ApiError> {
    admin::get_pause_state(data).await
}

/// Grants a role to an account. Requires the ADMIN role.
#[utoipa::path(
    post,
    path = "/api/v1/bridge/admin/roles",
    tag = "Administration",
    operation_id = "grantRole",
    security(("api_key" = [])),
    request_body = RoleRequest,
    responses(
        (status = 200, description = "Role granted", body = ApiResponse<String>),
        (status = 403, description = "Caller is not an admin", body = ApiResponse<String>),
    )
)]
#[post("/bridge/admin/roles")]
async fn grant_role(
    req: HttpRequest,
    body: web::Json<RoleRequest>,
    data: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let caller = caller_from_request(&req)?;
    admin::grant_role(caller, body.into_inner(), data).await
}

/// Revokes a role from an account. Requires the ADMIN role.
#[utoipa::path(
    delete,
    path = "/api/v1/bridge/admin/roles",
    tag = "Administration",
    operation_id = "revokeRole",
    security(("api_key" = [])),
    request_body = RoleRequest,
    responses(
        (status = 200, description = "Role revoked", body = ApiResponse<String>),
        (status = 403, description = "Caller is not an admin", body = ApiResponse<String>),
    )
)]
#[delete("/bridge/admin/roles")]
async fn revoke_role(
    req: HttpRequest,
    body: web::Json<RoleRequest>,
    data: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let caller = caller_from_request(&req)?;
    admin::revoke_role(caller, body.into_inner(), data).await
}

/// Adds a counter-domain gateway to the authorized-endpoint allowlist.
/// Requires the OPERATOR role.
#[utoipa::path(
    post,
    path = "/api/v1/bridge/admin/endpoints",
    tag = "Administration",
    operation_id = "authorizeEndpoint",
    security(("api_key" = [])),
    request_body = EndpointRequest,
    responses(
        (status = 200, description = "Endpoint authorized", body = ApiResponse<String>),
        (status = 403, description = "Caller is not an operator", body = ApiResponse<String>),
    )
)]
#[post("/bridge/admin/endpoints")]
async fn authorize_endpoint(
    req: HttpRequest,
    body: web::Json<EndpointRequest>,
    data: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let caller = caller_from_request(&req)?;
    admin::authorize_endpoint(caller, body.into_inner(), data).await
}

/// Removes a gateway from the allowlist. Requires the OPERATOR role.
#[utoipa::path(
    delete,
    path = "/api/v1/bridge/admin/endpoints",
    tag = "Administration",
    operation_id = "revokeEndpoint",
    security(("api_key" = [])),
    request_body = EndpointRequest,
    responses(
        (status = 200, description = "Endpoint revoked", body = ApiResponse<String>),
        (status = 403, description = "Caller is not an operator", body = ApiResponse<String>),
    )
)]
#[delete("/bridge/admin/endpoints")]
async fn revoke_endpoint(
    req: HttpRequest,
    body: web::Json<EndpointRequest>,
    data: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let caller = caller_from_request(&req)?;
    admin::revoke_endpoint(caller, body.into_inner(), data).await
}

/// Credits domain funds to an account (gateway-observed inbound value).
/// Requires the OPERATOR role.
#[utoipa::path(
    post,
    path = "/api/v1/bridge/admin/credits",
    tag = "Administration",
    operation_id = "creditAccount",
    security(("api_key" = [])),
    request_body = CreditRequest,
    responses(
        (status = 200, description = "Account credited", body = ApiResponse<BalanceResponse>),
        (status = 403, description = "Caller is not an operator", body = ApiResponse<String>),
    )
)]
#[post("/bridge/admin/credits")]
async fn credit(
    req: HttpRequest,
    body: web::Json<CreditRequest>,
    data: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let caller = caller_from_request(&req)?;
    admin::credit(caller, body.into_inner(), data).await
}

/// Registers a transferable record under an owner. Requires the OPERATOR
/// role.
#[utoipa::path(
    post,
    path = "/api/v1/bridge/admin/records",
    tag = "Administration",
    operation_id = "registerRecord",
    security(("api_key" = [])),
    request_body = RegisterRecordRequest,
    responses(
        (status = 201, description = "Record registered", body = ApiResponse<String>),
        (status = 400, description = "Record already registered", body = ApiResponse<String>),
        (status = 403, description = "Caller is not an operator", body = ApiResponse<String>),
    )
)]
#[post("/bridge/admin/records")]
async fn register_record(
    req: HttpRequest,
    body: web::Json<RegisterRecordRequest>,
    data: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let caller = caller_from_request(&req)?;
    admin::register_record(caller, body.into_inner(), data).await
}

/// Drains escrowed funds outside the operation path. The escape hatch for
/// stuck escrow; audited distinctly. Requires the ADMIN role.
#[utoipa::path(
    post,
    path = "/api/v1/bridge/admin/emergency-withdrawals",
    tag = "Administration",
    operation_id = "emergencyWithdraw",
    security(("api_key" = [])),
    request_body = EmergencyWithdrawRequest,
    responses(
        (status = 200, description = "Escrow drained", body = ApiResponse<String>),
        (status = 400, description = "Insufficient escrow balance", body = ApiResponse<String>),
        (status = 403, description = "Caller is not an admin", body = ApiResponse<String>),
    )
)]
#[post("/bridge/admin/emergency-withdrawals")]
async fn emergency_withdraw(
    req: HttpRequest,
    body: web::Json<EmergencyWithdrawRequest>,
    data: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let caller = caller_from_request(&req)?;
    admin::emergency_withdraw(caller, body.into_inner(), data).await
}

/// Lists audit log entries, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/bridge/admin/audit",
    tag = "Administration",
    operation_id = "listAuditLog",
    security(("api_key" = [])),
    params(
        ("page" = Option<u32>, Query, description = "Page number for pagination (starts at 1)"),
        ("per_page" = Option<u32>, Query, description = "Number of items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Audit entries retrieved", body = ApiResponse<Vec<crate::events::AuditEntry>>),
    )
)]
#[get("/bridge/admin/audit")]
async fn list_audit_log(
    query: web::Query<PaginationQuery>,
    data: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    admin::list_audit_log(query.into_inner(), data).await
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(pause)
        .service(unpause)
        .service(get_pause_state)
        .service(grant_role)
        .service(revoke_role)
        .service(authorize_endpoint)
        .service(revoke_endpoint)
        .service(credit)
        .service(register_record)
        .service(emergency_withdraw)
        .service(list_audit_log);
}
