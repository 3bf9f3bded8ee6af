//! Admin role management.
//!
//! Every operation authorizes the caller first and performs at most one
//! claims write against the identity directory. Claims are merged, not
//! replaced, so granting or revoking admin never drops unrelated claims.

use std::sync::Arc;

use crate::dtos::admin::{AdminActionResponse, ListUsersResponse, UserRecord};
use crate::models::{AdminAllowList, AuthContext};
use crate::services::{IdentityDirectory, ServiceError};

/// Accounts fetched per listing call. Only the first directory page is
/// served; there is no cursor continuation.
pub const LIST_PAGE_SIZE: u32 = 100;

#[derive(Clone)]
pub struct AdminService {
    directory: Arc<dyn IdentityDirectory>,
    allow_list: AdminAllowList,
}

impl AdminService {
    pub fn new(directory: Arc<dyn IdentityDirectory>, allow_list: AdminAllowList) -> Self {
        Self {
            directory,
            allow_list,
        }
    }

    /// The admin predicate: a caller is an admin if their token carries
    /// `admin: true` or their email is on the allow list. Every operation
    /// that authorizes an admin goes through this one check.
    pub fn is_admin(&self, ctx: &AuthContext) -> bool {
        ctx.claims.admin || self.allow_list.contains(&ctx.email)
    }

    pub async fn grant_admin(
        &self,
        ctx: &AuthContext,
        email: &str,
    ) -> Result<AdminActionResponse, ServiceError> {
        if !self.is_admin(ctx) {
            return Err(ServiceError::PermissionDenied(
                "Only admins can grant admin roles.".to_string(),
            ));
        }
        if email.trim().is_empty() {
            return Err(ServiceError::EmailRequired);
        }

        let account = self.directory.find_by_email(email).await?;
        let claims = account.claims().with_admin(true);
        self.directory
            .set_custom_claims(&account.uid, &claims)
            .await?;

        tracing::info!(
            caller_uid = %ctx.uid,
            target_uid = %account.uid,
            target_email = %email,
            "Admin role granted"
        );
        super::metrics::observe_role_change("grant");

        Ok(AdminActionResponse {
            success: true,
            message: format!("{} is now an admin!", email),
        })
    }

    pub async fn revoke_admin(
        &self,
        ctx: &AuthContext,
        email: &str,
    ) -> Result<AdminActionResponse, ServiceError> {
        if !self.is_admin(ctx) {
            return Err(ServiceError::PermissionDenied(
                "Only admins can remove admin roles.".to_string(),
            ));
        }
        if email.trim().is_empty() {
            return Err(ServiceError::EmailRequired);
        }

        let account = self.directory.find_by_email(email).await?;
        let claims = account.claims().with_admin(false);
        self.directory
            .set_custom_claims(&account.uid, &claims)
            .await?;

        tracing::info!(
            caller_uid = %ctx.uid,
            target_uid = %account.uid,
            target_email = %email,
            "Admin role revoked"
        );
        super::metrics::observe_role_change("revoke");

        Ok(AdminActionResponse {
            success: true,
            message: format!("{} is no longer an admin.", email),
        })
    }

    pub async fn list_users(&self, ctx: &AuthContext) -> Result<ListUsersResponse, ServiceError> {
        if !self.is_admin(ctx) {
            return Err(ServiceError::PermissionDenied(
                "Only admins can view all users.".to_string(),
            ));
        }

        let page = self.directory.list_accounts(LIST_PAGE_SIZE).await?;
        let users: Vec<UserRecord> = page.accounts.iter().map(UserRecord::from).collect();

        tracing::debug!(caller_uid = %ctx.uid, count = users.len(), "Listed users");

        Ok(ListUsersResponse {
            success: true,
            users,
        })
    }

    /// Escape hatch out of the zero-admin state: the caller promotes
    /// themselves, and only the allow list grants the right to do so. An
    /// `admin: true` claim is deliberately not sufficient here.
    pub async fn bootstrap_first_admin(
        &self,
        ctx: &AuthContext,
    ) -> Result<AdminActionResponse, ServiceError> {
        if !self.allow_list.contains(&ctx.email) {
            return Err(ServiceError::PermissionDenied(
                "You are not authorized to be an admin.".to_string(),
            ));
        }

        let account = self.directory.find_by_uid(&ctx.uid).await?;
        let claims = account.claims().with_admin(true);
        self.directory.set_custom_claims(&ctx.uid, &claims).await?;

        tracing::info!(caller_uid = %ctx.uid, caller_email = %ctx.email, "First admin bootstrapped");
        super::metrics::observe_role_change("bootstrap");

        Ok(AdminActionResponse {
            success: true,
            message: format!("{} is now the first admin!", ctx.email),
        })
    }
}
