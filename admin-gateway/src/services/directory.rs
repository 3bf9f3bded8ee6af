//! Identity directory client.
//!
//! The directory is the external system of record for user accounts.
//! This service reads accounts, patches their custom claims, and lists
//! them; nothing more.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use thiserror::Error;

use crate::config::DirectoryConfig;
use crate::models::{AccountPage, CustomClaims, DirectoryAccount};

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("There is no account record corresponding to the provided identifier.")]
    NotFound,

    #[error("Directory rejected the request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Directory request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for DirectoryError {
    fn from(err: reqwest::Error) -> Self {
        DirectoryError::Transport(err.to_string())
    }
}

#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<DirectoryAccount, DirectoryError>;
    async fn find_by_uid(&self, uid: &str) -> Result<DirectoryAccount, DirectoryError>;
    async fn set_custom_claims(
        &self,
        uid: &str,
        claims: &CustomClaims,
    ) -> Result<(), DirectoryError>;
    async fn list_accounts(&self, page_size: u32) -> Result<AccountPage, DirectoryError>;
    async fn health_check(&self) -> Result<(), DirectoryError>;
}

/// HTTP client for the identity directory's REST surface.
#[derive(Clone)]
pub struct RestDirectory {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestDirectory {
    pub fn new(config: &DirectoryConfig) -> Result<Self, anyhow::Error> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build directory HTTP client: {}", e))?;

        tracing::info!(
            url = %config.url,
            timeout_seconds = config.timeout_seconds,
            "Identity directory client configured"
        );

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach auth and trace headers and dispatch the request.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, DirectoryError> {
        let mut headers = reqwest::header::HeaderMap::new();
        service_core::observability::inject_trace_context(&mut headers);

        let response = request
            .bearer_auth(&self.api_key)
            .headers(headers)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DirectoryError::NotFound);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request rejected")
                    .to_string()
            } else {
                body.trim().to_string()
            };
            return Err(DirectoryError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl IdentityDirectory for RestDirectory {
    async fn find_by_email(&self, email: &str) -> Result<DirectoryAccount, DirectoryError> {
        let response = self
            .send(
                self.http
                    .get(self.url("/v1/accounts/by-email"))
                    .query(&[("email", email)]),
            )
            .await?;
        Ok(response.json().await?)
    }

    async fn find_by_uid(&self, uid: &str) -> Result<DirectoryAccount, DirectoryError> {
        let response = self
            .send(self.http.get(self.url(&format!("/v1/accounts/{}", uid))))
            .await?;
        Ok(response.json().await?)
    }

    async fn set_custom_claims(
        &self,
        uid: &str,
        claims: &CustomClaims,
    ) -> Result<(), DirectoryError> {
        self.send(
            self.http
                .put(self.url(&format!("/v1/accounts/{}/claims", uid)))
                .json(claims),
        )
        .await?;
        Ok(())
    }

    async fn list_accounts(&self, page_size: u32) -> Result<AccountPage, DirectoryError> {
        let response = self
            .send(
                self.http
                    .get(self.url("/v1/accounts"))
                    .query(&[("pageSize", page_size)]),
            )
            .await?;
        Ok(response.json().await?)
    }

    async fn health_check(&self) -> Result<(), DirectoryError> {
        self.send(self.http.get(self.url("/healthz"))).await?;
        Ok(())
    }
}

/// In-memory directory double for tests. Preserves insertion order (the
/// directory's "native listing order"), counts every call, and can be
/// switched into a failing mode.
#[derive(Default)]
pub struct MockDirectory {
    accounts: Mutex<Vec<DirectoryAccount>>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: Vec<DirectoryAccount>) -> Self {
        Self {
            accounts: Mutex::new(accounts),
            ..Self::default()
        }
    }

    /// Insert an account, replacing any existing record with the same uid.
    pub fn seed(&self, account: DirectoryAccount) {
        let mut accounts = self
            .accounts
            .lock()
            .expect("mock directory mutex poisoned");
        if let Some(existing) = accounts.iter_mut().find(|a| a.uid == account.uid) {
            *existing = account;
        } else {
            accounts.push(account);
        }
    }

    /// Total number of directory operations performed.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// When failing, every operation returns a transport error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Inspect the stored record for a uid.
    pub fn account(&self, uid: &str) -> Option<DirectoryAccount> {
        self.accounts
            .lock()
            .expect("mock directory mutex poisoned")
            .iter()
            .find(|a| a.uid == uid)
            .cloned()
    }

    fn lock_accounts(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, Vec<DirectoryAccount>>, DirectoryError> {
        self.accounts
            .lock()
            .map_err(|e| DirectoryError::Transport(format!("mock directory mutex poisoned: {}", e)))
    }

    fn record_call(&self) -> Result<(), DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(DirectoryError::Transport(
                "directory offline (simulated)".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityDirectory for MockDirectory {
    async fn find_by_email(&self, email: &str) -> Result<DirectoryAccount, DirectoryError> {
        self.record_call()?;
        self.lock_accounts()?
            .iter()
            .find(|a| a.email.as_deref() == Some(email))
            .cloned()
            .ok_or(DirectoryError::NotFound)
    }

    async fn find_by_uid(&self, uid: &str) -> Result<DirectoryAccount, DirectoryError> {
        self.record_call()?;
        self.lock_accounts()?
            .iter()
            .find(|a| a.uid == uid)
            .cloned()
            .ok_or(DirectoryError::NotFound)
    }

    async fn set_custom_claims(
        &self,
        uid: &str,
        claims: &CustomClaims,
    ) -> Result<(), DirectoryError> {
        self.record_call()?;
        let mut accounts = self.lock_accounts()?;
        let account = accounts
            .iter_mut()
            .find(|a| a.uid == uid)
            .ok_or(DirectoryError::NotFound)?;
        account.custom_claims = Some(claims.clone());
        Ok(())
    }

    async fn list_accounts(&self, page_size: u32) -> Result<AccountPage, DirectoryError> {
        self.record_call()?;
        let accounts = self.lock_accounts()?;
        let page: Vec<DirectoryAccount> =
            accounts.iter().take(page_size as usize).cloned().collect();
        let next_page_token = if accounts.len() > page_size as usize {
            Some("next-page".to_string())
        } else {
            None
        };
        Ok(AccountPage {
            accounts: page,
            next_page_token,
        })
    }

    async fn health_check(&self) -> Result<(), DirectoryError> {
        self.record_call()?;
        Ok(())
    }
}
