//! Custom claims attached to identity directory accounts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The claims bag stored on a directory account and embedded in issued
/// tokens. The `admin` flag is the only claim this service interprets;
/// everything else rides along in `extra` so a claim patch never drops
/// unrelated claims.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomClaims {
    #[serde(default)]
    pub admin: bool,

    #[serde(flatten)]
    pub extra: BTreeMap<String, bool>,
}

impl CustomClaims {
    pub fn admin() -> Self {
        Self {
            admin: true,
            ..Self::default()
        }
    }

    /// Return the same claims with the admin flag set to `admin`.
    pub fn with_admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }
}
