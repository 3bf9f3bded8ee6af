use axum::{extract::State, response::IntoResponse, Json};
use service_core::error::AppError;

use crate::{
    dtos::{
        admin::{AdminActionResponse, GrantAdminRequest, ListUsersResponse, RevokeAdminRequest},
        ErrorResponse,
    },
    middleware::Caller,
    utils::ValidatedJson,
    AppState,
};

/// Grant the admin role to the account matching an email
#[utoipa::path(
    post,
    path = "/admin/grant",
    request_body = GrantAdminRequest,
    responses(
        (status = 200, description = "Admin role granted", body = AdminActionResponse),
        (status = 400, description = "Missing or empty email", body = ErrorResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 500, description = "Directory failure", body = ErrorResponse)
    ),
    tag = "Admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn grant_admin(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    ValidatedJson(req): ValidatedJson<GrantAdminRequest>,
) -> Result<impl IntoResponse, AppError> {
    let res = state.admin.grant_admin(&ctx, &req.email).await?;
    Ok(Json(res))
}

/// Remove the admin role from the account matching an email
#[utoipa::path(
    post,
    path = "/admin/revoke",
    request_body = RevokeAdminRequest,
    responses(
        (status = 200, description = "Admin role revoked", body = AdminActionResponse),
        (status = 400, description = "Missing or empty email", body = ErrorResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 500, description = "Directory failure", body = ErrorResponse)
    ),
    tag = "Admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn revoke_admin(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    ValidatedJson(req): ValidatedJson<RevokeAdminRequest>,
) -> Result<impl IntoResponse, AppError> {
    let res = state.admin.revoke_admin(&ctx, &req.email).await?;
    Ok(Json(res))
}

/// List directory accounts (first page, admin only)
#[utoipa::path(
    get,
    path = "/admin/users",
    responses(
        (status = 200, description = "Directory accounts in native order", body = ListUsersResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 500, description = "Directory failure", body = ErrorResponse)
    ),
    tag = "Admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Caller(ctx): Caller,
) -> Result<impl IntoResponse, AppError> {
    let res = state.admin.list_users(&ctx).await?;
    Ok(Json(res))
}

/// Promote the allow-listed caller to the first admin
#[utoipa::path(
    post,
    path = "/admin/bootstrap",
    responses(
        (status = 200, description = "Caller promoted", body = AdminActionResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Caller email is not allow-listed", body = ErrorResponse),
        (status = 500, description = "Directory failure", body = ErrorResponse)
    ),
    tag = "Admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn bootstrap_first_admin(
    State(state): State<AppState>,
    Caller(ctx): Caller,
) -> Result<impl IntoResponse, AppError> {
    let res = state.admin.bootstrap_first_admin(&ctx).await?;
    Ok(Json(res))
}
