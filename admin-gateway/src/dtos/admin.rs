use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::DirectoryAccount;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GrantAdminRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    #[schema(example = "new-admin@example.com")]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RevokeAdminRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    #[schema(example = "former-admin@example.com")]
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminActionResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "new-admin@example.com is now an admin!")]
    pub message: String,
}

/// Projection of a directory account for the user listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[schema(example = "b5cRNJIdGlZ2N0xt4cdDUnVLRYl2")]
    pub uid: String,

    #[schema(example = "bob@x.com")]
    pub email: Option<String>,

    /// Stored display name, or the email local-part, or "No Name".
    #[schema(example = "bob")]
    pub display_name: String,

    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,

    #[schema(example = false)]
    pub is_admin: bool,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,

    #[schema(value_type = Option<String>, format = "date-time")]
    pub last_sign_in: Option<DateTime<Utc>>,
}

impl From<&DirectoryAccount> for UserRecord {
    fn from(account: &DirectoryAccount) -> Self {
        Self {
            uid: account.uid.clone(),
            email: account.email.clone(),
            display_name: account.display_label(),
            photo_url: account.photo_url.clone(),
            is_admin: account.is_admin(),
            created_at: account.created_at,
            last_sign_in: account.last_sign_in,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListUsersResponse {
    #[schema(example = true)]
    pub success: bool,
    pub users: Vec<UserRecord>,
}
