//! Per-request caller identity.

use super::CustomClaims;

/// The verified caller of a request, built by the authentication
/// middleware from a bearer token. A request without a valid token is
/// rejected before any handler sees it, so holding an `AuthContext`
/// implies the caller is authenticated.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub uid: String,
    pub email: String,
    pub claims: CustomClaims,
}
