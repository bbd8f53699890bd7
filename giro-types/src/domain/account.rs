//! Merchant account credentials and gateway configuration.

use std::fmt;

use crate::domain::gateway::{LIVE_URL, TEST_URL};
use crate::domain::transaction::{Action, TransactionContext};
use crate::error::ConfigError;

/// Merchant credentials sent with (and signing) every request.
///
/// Immutable once constructed. The secret never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountCredentials {
    merchant_id: String,
    project_id: String,
    secret: String,
}

impl AccountCredentials {
    /// Creates credentials, rejecting blank values.
    pub fn new(
        merchant_id: impl Into<String>,
        project_id: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let creds = Self {
            merchant_id: merchant_id.into(),
            project_id: project_id.into(),
            secret: secret.into(),
        };
        if creds.merchant_id.trim().is_empty() {
            return Err(ConfigError::MissingField("merchant_id"));
        }
        if creds.project_id.trim().is_empty() {
            return Err(ConfigError::MissingField("project_id"));
        }
        if creds.secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        Ok(creds)
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for AccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountCredentials")
            .field("merchant_id", &self.merchant_id)
            .field("project_id", &self.project_id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Everything a gateway client needs, fixed at construction.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub credentials: AccountCredentials,
    pub defaults: TransactionContext,
    base_url: Option<String>,
    test: bool,
}

impl GatewayConfig {
    pub fn new(credentials: AccountCredentials, defaults: TransactionContext) -> Self {
        Self {
            credentials,
            defaults,
            base_url: None,
            test: false,
        }
    }

    /// Overrides the endpoint base (mainly for sandboxes and tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Marks the configuration as test mode; reflected on every outcome.
    pub fn with_test_mode(mut self, test: bool) -> Self {
        self.test = test;
        self
    }

    pub fn is_test(&self) -> bool {
        self.test
    }

    pub fn base_url(&self) -> &str {
        match &self.base_url {
            Some(url) => url.as_str(),
            None if self.test => TEST_URL,
            None => LIVE_URL,
        }
    }

    /// Full endpoint URL for `action`.
    pub fn endpoint(&self, action: Action) -> String {
        format!("{}/{}", self.base_url().trim_end_matches('/'), action)
    }
}
