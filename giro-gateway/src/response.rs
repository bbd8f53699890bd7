//! Interpretation of gateway replies.

use serde_json::{Map, Value};

use giro_types::{Outcome, ReferenceToken};

const RESULT_CODE: &str = "rc";
const MESSAGE: &str = "message";
const REFERENCE: &str = "reference";

/// Parses a raw reply into an [`Outcome`].
///
/// Fails only when `raw` is not a JSON object. A missing or non-numeric
/// result code is a failed outcome, not an error.
pub fn interpret(raw: &str, test: bool) -> Result<Outcome, serde_json::Error> {
    let params: Map<String, Value> = serde_json::from_str(raw)?;

    let success = result_code(&params) == Some(0);
    let message = text_field(&params, MESSAGE);
    let authorization = text_field(&params, REFERENCE).map(ReferenceToken::from);

    Ok(Outcome::new(success, message, authorization, test, params))
}

/// Result code as an integer; accepts JSON numbers and numeric strings.
/// Fractional codes are truncated toward zero.
fn result_code(params: &Map<String, Value>) -> Option<i64> {
    match params.get(RESULT_CODE)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text_field(params: &Map<String, Value>, name: &str) -> Option<String> {
    match params.get(name)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
