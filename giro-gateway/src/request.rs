//! Signed request shapes.
//!
//! Field order below is the exact signing input expected by the gateway.
//! Changing it invalidates every signature.

use serde::Serialize;

use giro_types::{
    AccountCredentials, Action, ConfigError, FieldSet, ReferenceToken, StartOptions,
    TransactionContext,
};

use crate::signature;

pub const MERCHANT_ID: &str = "merchantId";
pub const PROJECT_ID: &str = "projectId";
pub const MERCHANT_TX_ID: &str = "merchantTxId";
pub const AMOUNT: &str = "amount";
pub const CURRENCY: &str = "currency";
pub const PURPOSE: &str = "purpose";
pub const TYPE: &str = "type";
pub const LOCALE: &str = "locale";
pub const MOBILE: &str = "mobile";
pub const PKN: &str = "pkn";
pub const RECURRING: &str = "recurring";
pub const URL_REDIRECT: &str = "urlRedirect";
pub const URL_NOTIFY: &str = "urlNotify";
pub const REFERENCE: &str = "reference";
pub const HASH: &str = "hash";

const BASE_FIELDS: &[&str] = &[MERCHANT_ID, PROJECT_ID, MERCHANT_TX_ID, AMOUNT, CURRENCY];

const START_FIELDS: &[&str] = &[
    PURPOSE,
    TYPE,
    LOCALE,
    MOBILE,
    PKN,
    RECURRING,
    URL_REDIRECT,
    URL_NOTIFY,
];

const VOID_FIELDS: &[&str] = &[MERCHANT_ID, PROJECT_ID, MERCHANT_TX_ID, REFERENCE];

/// A request ready for submission: its fields with `hash` appended last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedRequest {
    action: Action,
    fields: FieldSet,
}

impl SignedRequest {
    /// Signs `fields` and appends the signature as the final `hash` field.
    fn seal(action: Action, mut fields: FieldSet, secret: &str) -> Result<Self, ConfigError> {
        let hash = signature::sign(&fields, secret)?;
        fields.set(HASH, hash);
        Ok(Self { action, fields })
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// All fields, `hash` included as the last entry.
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn signature(&self) -> &str {
        self.fields.get(HASH).unwrap_or_default()
    }

    /// Fields covered by the signature, in signing order.
    pub fn signed_fields(&self) -> FieldSet {
        let mut fields = FieldSet::new();
        for (name, value) in self.fields.pairs().iter().filter(|(n, _)| n != HASH) {
            fields.set(name, value);
        }
        fields
    }

    /// Checks the `hash` field against the other fields.
    pub fn verify(&self, secret: &str) -> Result<bool, ConfigError> {
        signature::verify(&self.signed_fields(), secret, self.signature())
    }

    /// `application/x-www-form-urlencoded` body, fields in insertion order.
    pub fn to_form_body(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(self.fields.pairs())
    }
}

fn add_base_fields(fields: &mut FieldSet, creds: &AccountCredentials, ctx: &TransactionContext) {
    fields
        .set(MERCHANT_ID, creds.merchant_id())
        .set(PROJECT_ID, creds.project_id())
        .set(MERCHANT_TX_ID, &ctx.merchant_tx_id)
        .set(AMOUNT, ctx.amount)
        .set(CURRENCY, &ctx.currency);
}

fn add_start_fields(fields: &mut FieldSet, ctx: &TransactionContext, opts: &StartOptions) {
    fields
        .set(PURPOSE, &ctx.purpose)
        .set(TYPE, opts.transaction_type.as_str())
        .set(LOCALE, &opts.locale)
        .set(MOBILE, opts.mobile)
        .set(PKN, opts.pkn.as_str())
        .set(RECURRING, opts.recurring)
        .set(URL_REDIRECT, &opts.url_redirect)
        .set(URL_NOTIFY, &opts.url_notify);
}

/// Builds the request that opens a transaction.
pub fn build_start(
    creds: &AccountCredentials,
    ctx: &TransactionContext,
    opts: &StartOptions,
) -> Result<SignedRequest, ConfigError> {
    let mut fields = FieldSet::new();
    add_base_fields(&mut fields, creds, ctx);
    add_start_fields(&mut fields, ctx, opts);
    fields.require(BASE_FIELDS)?;
    fields.require(START_FIELDS)?;
    SignedRequest::seal(Action::Start, fields, creds.secret())
}

fn build_referenced(
    action: Action,
    creds: &AccountCredentials,
    ctx: &TransactionContext,
    reference: &ReferenceToken,
) -> Result<SignedRequest, ConfigError> {
    let mut fields = FieldSet::new();
    add_base_fields(&mut fields, creds, ctx);
    fields.set(REFERENCE, reference.as_str());
    fields.require(BASE_FIELDS)?;
    fields.require(&[REFERENCE])?;
    SignedRequest::seal(action, fields, creds.secret())
}

/// Builds the request that settles an authorized transaction.
pub fn build_capture(
    creds: &AccountCredentials,
    ctx: &TransactionContext,
    reference: &ReferenceToken,
) -> Result<SignedRequest, ConfigError> {
    build_referenced(Action::Capture, creds, ctx, reference)
}

/// Builds the request that refunds a settled transaction.
pub fn build_refund(
    creds: &AccountCredentials,
    ctx: &TransactionContext,
    reference: &ReferenceToken,
) -> Result<SignedRequest, ConfigError> {
    build_referenced(Action::Refund, creds, ctx, reference)
}

/// Builds the request that cancels an authorized transaction.
///
/// Unlike capture and refund, void carries no amount or currency.
pub fn build_void(
    creds: &AccountCredentials,
    ctx: &TransactionContext,
    reference: &ReferenceToken,
) -> Result<SignedRequest, ConfigError> {
    let mut fields = FieldSet::new();
    fields
        .set(MERCHANT_ID, creds.merchant_id())
        .set(PROJECT_ID, creds.project_id())
        .set(MERCHANT_TX_ID, &ctx.merchant_tx_id)
        .set(REFERENCE, reference.as_str());
    fields.require(VOID_FIELDS)?;
    SignedRequest::seal(Action::Void, fields, creds.secret())
}

#[cfg(test)]
mod tests {
    use super::*;
    use giro_types::{Pkn, TransactionOverrides, TransactionType};

    const SECRET: &str = "vh293izPP7De";

    fn creds() -> AccountCredentials {
        AccountCredentials::new("5103056", "45490", SECRET).unwrap()
    }

    fn ctx() -> TransactionContext {
        TransactionContext::new("4711", 100, "EUR", "Ihr Alvito Einkauf 4711").unwrap()
    }

    fn start_options() -> StartOptions {
        StartOptions {
            transaction_type: TransactionType::Auth,
            locale: "de".into(),
            mobile: true,
            pkn: Pkn::Create,
            recurring: false,
            url_redirect: "https://alvito.com/de/checkout/after-payment/".into(),
            url_notify: "https://alvito.com/de/checkout/payment-update/".into(),
            overrides: TransactionOverrides::default(),
        }
    }

    fn names(request: &SignedRequest) -> Vec<&str> {
        request.fields().names().collect()
    }

    #[test]
    fn test_start_field_order_and_hash() {
        let request = build_start(&creds(), &ctx(), &start_options()).unwrap();

        assert_eq!(request.action(), Action::Start);
        assert_eq!(
            names(&request),
            vec![
                "merchantId",
                "projectId",
                "merchantTxId",
                "amount",
                "currency",
                "purpose",
                "type",
                "locale",
                "mobile",
                "pkn",
                "recurring",
                "urlRedirect",
                "urlNotify",
                "hash",
            ]
        );
        assert_eq!(request.fields().get("mobile"), Some("1"));
        assert_eq!(request.fields().get("recurring"), Some("0"));
        assert_eq!(request.fields().get("pkn"), Some("create"));
        assert_eq!(request.signature(), "bcbceb93dfde372f90a6c6e3838548c1");
        assert_eq!(
            request.signature(),
            signature::sign(&request.signed_fields(), SECRET).unwrap()
        );
        assert!(request.verify(SECRET).unwrap());
    }

    #[test]
    fn test_start_requires_options() {
        let mut opts = start_options();
        opts.url_notify = String::new();

        let err = build_start(&creds(), &ctx(), &opts).unwrap_err();
        assert_eq!(err, ConfigError::MissingField(URL_NOTIFY));

        let mut opts = start_options();
        opts.locale = " ".into();
        let err = build_start(&creds(), &ctx(), &opts).unwrap_err();
        assert_eq!(err, ConfigError::MissingField(LOCALE));
    }

    #[test]
    fn test_start_with_stored_pkn() {
        let mut opts = start_options();
        opts.pkn = Pkn::Token("a1b2c3".into());

        let request = build_start(&creds(), &ctx(), &opts).unwrap();
        assert_eq!(request.fields().get("pkn"), Some("a1b2c3"));
    }

    #[test]
    fn test_capture_shape() {
        let request = build_capture(&creds(), &ctx(), &"ref-123".into()).unwrap();

        assert_eq!(request.action(), Action::Capture);
        assert_eq!(
            names(&request),
            vec![
                "merchantId",
                "projectId",
                "merchantTxId",
                "amount",
                "currency",
                "reference",
                "hash"
            ]
        );
        assert_eq!(request.signature(), "45a5df382572d127dbb6130ce0cddbcf");
    }

    #[test]
    fn test_refund_matches_capture_fields() {
        let reference = ReferenceToken::from("ref-123");
        let capture = build_capture(&creds(), &ctx(), &reference).unwrap();
        let refund = build_refund(&creds(), &ctx(), &reference).unwrap();

        assert_eq!(refund.action(), Action::Refund);
        assert_eq!(refund.fields(), capture.fields());
    }

    #[test]
    fn test_void_omits_amount_and_currency() {
        let ctx = ctx().merge(&TransactionOverrides {
            amount: Some(500),
            currency: Some("USD".into()),
            ..Default::default()
        });
        let request = build_void(&creds(), &ctx, &"ref-123".into()).unwrap();

        assert_eq!(
            names(&request),
            vec!["merchantId", "projectId", "merchantTxId", "reference", "hash"]
        );
        assert!(!request.fields().contains("amount"));
        assert!(!request.fields().contains("currency"));
        assert_eq!(request.signature(), "0aeed4aa706f00118dbc60cd1e1d504f");
    }

    #[test]
    fn test_empty_reference_is_rejected() {
        let err = build_capture(&creds(), &ctx(), &"".into()).unwrap_err();
        assert_eq!(err, ConfigError::MissingField(REFERENCE));

        let err = build_void(&creds(), &ctx(), &"".into()).unwrap_err();
        assert_eq!(err, ConfigError::MissingField(REFERENCE));
    }

    #[test]
    fn test_form_body_keeps_order_and_encodes() {
        let request = build_start(&creds(), &ctx(), &start_options()).unwrap();
        let body = request.to_form_body().unwrap();

        assert!(body.starts_with("merchantId=5103056&projectId=45490&merchantTxId=4711"));
        assert!(body.contains("&purpose=Ihr+Alvito+Einkauf+4711&"));
        assert!(body.contains("urlRedirect=https%3A%2F%2Falvito.com%2Fde%2Fcheckout%2Fafter-payment%2F"));
        assert!(body.ends_with("&hash=bcbceb93dfde372f90a6c6e3838548c1"));
    }
}
