use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use service_core::error::AppError;

use crate::{models::AuthContext, AppState};

/// Middleware to require authentication.
///
/// Verifies the bearer token and stores the resulting `AuthContext` in
/// request extensions. Requests without a verified caller are rejected
/// here, before any handler (and so before any directory traffic).
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let token = match token {
        Some(token) => token,
        None => {
            return Err(AppError::Unauthenticated(
                "User must be logged in.".to_string(),
            ));
        }
    };

    let claims = state
        .jwt
        .validate_access_token(token)
        .map_err(|_| AppError::Unauthenticated("Invalid or expired token".to_string()))?;

    let ctx = AuthContext {
        uid: claims.sub,
        email: claims.email,
        claims: claims.claims,
    };

    // Store the caller in request extensions so handlers can access it
    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}

/// Extractor to easily get the verified caller in handlers
pub struct Caller(pub AuthContext);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts.extensions.get::<AuthContext>().ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "Auth context missing from request extensions"
            ))
        })?;

        Ok(Caller(ctx.clone()))
    }
}
