//! GiroCheckout gateway client.
//!
//! Orchestrates each operation end to end: merge the configured
//! defaults with call-specific overrides, build and sign the request,
//! submit it through the transport port, interpret the reply.

use tracing::{debug, info, instrument, warn};

use giro_types::{
    GatewayConfig, Outcome, ReferenceToken, StartOptions, TransactionOverrides, Transport,
};

use crate::error::GatewayError;
use crate::request::{self, SignedRequest};
use crate::response;

/// Gateway client.
///
/// Generic over `T: Transport` - the adapter is injected at construction.
/// Holds only immutable configuration, so it can serve concurrent callers.
pub struct GatewayClient<T: Transport> {
    config: GatewayConfig,
    transport: T,
}

impl<T: Transport> GatewayClient<T> {
    /// Creates a client with the given configuration and transport.
    pub fn new(config: GatewayConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Returns a reference to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Request construction
    // ─────────────────────────────────────────────────────────────────────────────

    /// Builds the signed start request without submitting it.
    pub fn prepare_start(&self, options: &StartOptions) -> Result<SignedRequest, GatewayError> {
        let ctx = self.config.defaults.merge(&options.overrides);
        Ok(request::build_start(&self.config.credentials, &ctx, options)?)
    }

    pub fn prepare_capture(
        &self,
        reference: &ReferenceToken,
        overrides: &TransactionOverrides,
    ) -> Result<SignedRequest, GatewayError> {
        let ctx = self.config.defaults.merge(overrides);
        Ok(request::build_capture(&self.config.credentials, &ctx, reference)?)
    }

    pub fn prepare_refund(
        &self,
        reference: &ReferenceToken,
        overrides: &TransactionOverrides,
    ) -> Result<SignedRequest, GatewayError> {
        let ctx = self.config.defaults.merge(overrides);
        Ok(request::build_refund(&self.config.credentials, &ctx, reference)?)
    }

    pub fn prepare_void(
        &self,
        reference: &ReferenceToken,
        overrides: &TransactionOverrides,
    ) -> Result<SignedRequest, GatewayError> {
        let ctx = self.config.defaults.merge(overrides);
        Ok(request::build_void(&self.config.credentials, &ctx, reference)?)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Opens a transaction. On success the outcome carries the reference
    /// and, for payment-page flows, a redirect URL.
    pub async fn start(&self, options: &StartOptions) -> Result<Outcome, GatewayError> {
        let request = self.prepare_start(options)?;
        self.commit(request).await
    }

    /// Settles an authorized transaction.
    pub async fn capture(&self, reference: &ReferenceToken) -> Result<Outcome, GatewayError> {
        self.capture_with(reference, &TransactionOverrides::default())
            .await
    }

    pub async fn capture_with(
        &self,
        reference: &ReferenceToken,
        overrides: &TransactionOverrides,
    ) -> Result<Outcome, GatewayError> {
        let request = self.prepare_capture(reference, overrides)?;
        self.commit(request).await
    }

    /// Refunds a settled transaction.
    pub async fn refund(&self, reference: &ReferenceToken) -> Result<Outcome, GatewayError> {
        self.refund_with(reference, &TransactionOverrides::default())
            .await
    }

    pub async fn refund_with(
        &self,
        reference: &ReferenceToken,
        overrides: &TransactionOverrides,
    ) -> Result<Outcome, GatewayError> {
        let request = self.prepare_refund(reference, overrides)?;
        self.commit(request).await
    }

    /// Cancels an authorized transaction.
    pub async fn void(&self, reference: &ReferenceToken) -> Result<Outcome, GatewayError> {
        self.void_with(reference, &TransactionOverrides::default())
            .await
    }

    pub async fn void_with(
        &self,
        reference: &ReferenceToken,
        overrides: &TransactionOverrides,
    ) -> Result<Outcome, GatewayError> {
        let request = self.prepare_void(reference, overrides)?;
        self.commit(request).await
    }

    #[instrument(
        skip(self, request),
        fields(
            action = %request.action(),
            merchant_tx_id = request.fields().get(request::MERCHANT_TX_ID).unwrap_or_default(),
        )
    )]
    async fn commit(&self, request: SignedRequest) -> Result<Outcome, GatewayError> {
        let url = self.config.endpoint(request.action());
        let body = request.to_form_body()?;
        debug!(
            url = %url,
            fields = ?request.fields().names().collect::<Vec<_>>(),
            "Submitting signed request"
        );

        let raw = self.transport.post_form(&url, body).await?;
        let outcome = response::interpret(&raw, self.config.is_test())?;

        if outcome.is_success() {
            info!(
                reference = outcome.authorization().map(|r| r.as_str()),
                "Gateway accepted request"
            );
        } else {
            warn!(
                rc = ?outcome.params().get("rc"),
                gateway_message = outcome.message(),
                "Gateway declined request"
            );
        }
        Ok(outcome)
    }
}
