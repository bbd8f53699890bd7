//! Per-transaction data: context, start options and reference tokens.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigError;

/// Gateway operation, also the final path segment of its endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Start,
    Capture,
    Refund,
    Void,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Capture => "capture",
            Action::Refund => "refund",
            Action::Void => "void",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of payment a start request opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Reserve the amount; settle later with a capture.
    Auth,
    /// Authorize and settle in one step.
    Sale,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Auth => "AUTH",
            TransactionType::Sale => "SALE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "AUTH" => Ok(TransactionType::Auth),
            "SALE" => Ok(TransactionType::Sale),
            other => Err(ConfigError::InvalidValue {
                field: "type",
                reason: format!("unknown transaction type {other}, expected AUTH or SALE"),
            }),
        }
    }
}

/// Payment-reference (`pkn`) selector for a start request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pkn {
    /// Register a new stored payment reference.
    Create,
    /// Reuse a previously stored payment reference.
    Token(String),
}

impl Pkn {
    const CREATE: &'static str = "create";

    pub fn as_str(&self) -> &str {
        match self {
            Pkn::Create => Self::CREATE,
            Pkn::Token(token) => token,
        }
    }
}

impl From<&str> for Pkn {
    fn from(value: &str) -> Self {
        if value == Self::CREATE {
            Pkn::Create
        } else {
            Pkn::Token(value.to_string())
        }
    }
}

impl fmt::Display for Pkn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque transaction handle returned by a successful start.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceToken(String);

impl ReferenceToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ReferenceToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ReferenceToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ReferenceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transaction-level fields shared by every request shape.
///
/// The configured context acts as the account-level defaults; each call
/// derives its own context with [`TransactionContext::merge`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionContext {
    pub merchant_tx_id: String,
    /// Amount in the smallest currency unit.
    pub amount: i64,
    pub currency: String,
    pub purpose: String,
}

impl TransactionContext {
    /// Creates the default context, rejecting blank required values.
    pub fn new(
        merchant_tx_id: impl Into<String>,
        amount: i64,
        currency: impl Into<String>,
        purpose: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let ctx = Self {
            merchant_tx_id: merchant_tx_id.into(),
            amount,
            currency: currency.into(),
            purpose: purpose.into(),
        };
        for (field, value) in [
            ("merchant_tx_id", &ctx.merchant_tx_id),
            ("currency", &ctx.currency),
            ("purpose", &ctx.purpose),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField(field));
            }
        }
        Ok(ctx)
    }

    /// Returns a new context with `overrides` applied. `self` is untouched.
    pub fn merge(&self, overrides: &TransactionOverrides) -> Self {
        Self {
            merchant_tx_id: overrides
                .merchant_tx_id
                .clone()
                .unwrap_or_else(|| self.merchant_tx_id.clone()),
            amount: overrides.amount.unwrap_or(self.amount),
            currency: overrides
                .currency
                .clone()
                .unwrap_or_else(|| self.currency.clone()),
            purpose: overrides
                .purpose
                .clone()
                .unwrap_or_else(|| self.purpose.clone()),
        }
    }
}

/// Call-specific replacements for the configured transaction context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_tx_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

/// Options of a start request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartOptions {
    pub transaction_type: TransactionType,
    pub locale: String,
    pub mobile: bool,
    pub pkn: Pkn,
    pub recurring: bool,
    pub url_redirect: String,
    pub url_notify: String,
    pub overrides: TransactionOverrides,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> TransactionContext {
        TransactionContext::new("4711", 100, "EUR", "Ihr Alvito Einkauf 4711").unwrap()
    }

    #[test]
    fn test_context_requires_values() {
        let result = TransactionContext::new("", 100, "EUR", "purpose");
        assert_eq!(result, Err(ConfigError::MissingField("merchant_tx_id")));

        let result = TransactionContext::new("4711", 100, "EUR", " ");
        assert_eq!(result, Err(ConfigError::MissingField("purpose")));
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let base = defaults();
        let merged = base.merge(&TransactionOverrides {
            merchant_tx_id: Some("4712".into()),
            amount: Some(250),
            ..Default::default()
        });

        assert_eq!(merged.merchant_tx_id, "4712");
        assert_eq!(merged.amount, 250);
        assert_eq!(merged.currency, "EUR");
        assert_eq!(merged.purpose, "Ihr Alvito Einkauf 4711");
        // Defaults stay as configured.
        assert_eq!(base, defaults());
    }

    #[test]
    fn test_pkn_sentinel() {
        assert_eq!(Pkn::from("create"), Pkn::Create);
        assert_eq!(Pkn::Create.as_str(), "create");
        assert_eq!(Pkn::from("tok-1"), Pkn::Token("tok-1".into()));
    }

    #[test]
    fn test_transaction_type_parsing() {
        assert_eq!("auth".parse::<TransactionType>(), Ok(TransactionType::Auth));
        assert_eq!("SALE".parse::<TransactionType>(), Ok(TransactionType::Sale));
        assert!("REFUND".parse::<TransactionType>().is_err());
    }
}
