//! Transport port.
//!
//! Implementations can be HTTP clients, in-memory mocks, etc.

use crate::error::TransportError;

/// Port trait for submitting encoded requests to the gateway.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// POSTs an `application/x-www-form-urlencoded` body to `url` and returns
    /// the raw response body.
    ///
    /// Timeouts, TLS and connection reuse are the implementation's concern.
    async fn post_form(&self, url: &str, body: String) -> Result<String, TransportError>;
}
