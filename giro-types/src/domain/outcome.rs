//! Normalized result of a gateway call.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::transaction::ReferenceToken;

/// Interpreted gateway reply.
///
/// A declined or rejected request is an `Outcome` with `success == false`,
/// not an error; callers branch on [`Outcome::is_success`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    success: bool,
    message: Option<String>,
    authorization: Option<ReferenceToken>,
    test: bool,
    params: Map<String, Value>,
}

impl Outcome {
    pub fn new(
        success: bool,
        message: Option<String>,
        authorization: Option<ReferenceToken>,
        test: bool,
        params: Map<String, Value>,
    ) -> Self {
        Self {
            success,
            message,
            authorization,
            test,
            params,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Transaction reference for later capture, refund or void.
    pub fn authorization(&self) -> Option<&ReferenceToken> {
        self.authorization.as_ref()
    }

    /// Whether the call was made in test mode.
    pub fn is_test(&self) -> bool {
        self.test
    }

    /// Raw parsed response body.
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Payment page URL; only meaningful after a start call.
    pub fn redirect(&self) -> Option<&str> {
        self.params.get("redirect").and_then(Value::as_str)
    }
}
