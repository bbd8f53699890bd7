//! Configuration loading from environment.

use std::env;

use anyhow::Context;
use giro_types::{AccountCredentials, GatewayConfig, TransactionContext};

/// Loads the gateway configuration from `GIRO_*` environment variables.
pub fn from_env() -> anyhow::Result<GatewayConfig> {
    from_lookup(|key| env::var(key).ok())
}

fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<GatewayConfig> {
    let require = |key: &str| {
        lookup(key).ok_or_else(|| anyhow::anyhow!("{key} environment variable is required"))
    };

    let credentials = AccountCredentials::new(
        require("GIRO_MERCHANT_ID")?,
        require("GIRO_PROJECT_ID")?,
        require("GIRO_SECRET")?,
    )?;

    let amount = require("GIRO_AMOUNT")?
        .trim()
        .parse::<i64>()
        .context("GIRO_AMOUNT must be an integer amount in cents")?;
    let defaults = TransactionContext::new(
        require("GIRO_MERCHANT_TX_ID")?,
        amount,
        require("GIRO_CURRENCY")?,
        require("GIRO_PURPOSE")?,
    )?;

    let test = lookup("GIRO_TEST_MODE")
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);

    let mut config = GatewayConfig::new(credentials, defaults).with_test_mode(test);
    if let Some(base_url) = lookup("GIRO_BASE_URL") {
        config = config.with_base_url(base_url);
    }
    Ok(config)
}
