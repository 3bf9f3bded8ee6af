//! Wire model of accounts owned by the external identity directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CustomClaims;

/// An account record as the identity directory serves it. This service
/// reads accounts and patches their claims; it never creates or deletes
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryAccount {
    pub uid: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(rename = "photoURL", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_claims: Option<CustomClaims>,

    #[serde(rename = "creationTime")]
    pub created_at: DateTime<Utc>,

    #[serde(
        rename = "lastSignInTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_sign_in: Option<DateTime<Utc>>,
}

impl DirectoryAccount {
    pub fn is_admin(&self) -> bool {
        self.custom_claims.as_ref().map(|c| c.admin).unwrap_or(false)
    }

    /// Current claims, or an empty bag for accounts that never had any.
    pub fn claims(&self) -> CustomClaims {
        self.custom_claims.clone().unwrap_or_default()
    }

    /// Display name with the fallback chain used in user listings:
    /// the stored name, then the email local-part, then "No Name".
    pub fn display_label(&self) -> String {
        if let Some(name) = self.display_name.as_ref().filter(|n| !n.is_empty()) {
            return name.clone();
        }
        match self.email.as_ref() {
            Some(email) => email.split('@').next().unwrap_or(email).to_string(),
            None => "No Name".to_string(),
        }
    }
}

/// One page of the directory's account listing, in its native order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPage {
    pub accounts: Vec<DirectoryAccount>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(display_name: Option<&str>, email: Option<&str>) -> DirectoryAccount {
        DirectoryAccount {
            uid: "uid-1".to_string(),
            email: email.map(|e| e.to_string()),
            display_name: display_name.map(|n| n.to_string()),
            photo_url: None,
            custom_claims: None,
            created_at: Utc::now(),
            last_sign_in: None,
        }
    }

    #[test]
    fn display_label_prefers_stored_name() {
        assert_eq!(
            account(Some("Bob Dylan"), Some("bob@x.com")).display_label(),
            "Bob Dylan"
        );
    }

    #[test]
    fn display_label_falls_back_to_email_local_part() {
        assert_eq!(account(None, Some("bob@x.com")).display_label(), "bob");
        // An empty stored name falls through just like a missing one.
        assert_eq!(account(Some(""), Some("bob@x.com")).display_label(), "bob");
    }

    #[test]
    fn display_label_without_email_is_no_name() {
        assert_eq!(account(None, None).display_label(), "No Name");
    }

    #[test]
    fn is_admin_requires_claim_set_to_true() {
        let mut acct = account(None, Some("a@x.com"));
        assert!(!acct.is_admin());

        acct.custom_claims = Some(CustomClaims::default());
        assert!(!acct.is_admin());

        acct.custom_claims = Some(CustomClaims::admin());
        assert!(acct.is_admin());
    }
}
