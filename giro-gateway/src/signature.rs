//! Request signatures.
//!
//! The gateway authenticates a request by an HMAC over the concatenation of
//! its field values, in insertion order, with no names or separators. The
//! digest is MD5 because the remote side requires it; do not reuse this
//! scheme for anything new.

use giro_types::{ConfigError, FieldSet};
use hmac::{Hmac, Mac};
use md5::Md5;
use subtle::ConstantTimeEq;

type HmacMd5 = Hmac<Md5>;

/// Signs `fields` with `secret`, returning lowercase hex.
pub fn sign(fields: &FieldSet, secret: &str) -> Result<String, ConfigError> {
    if secret.is_empty() {
        return Err(ConfigError::EmptySecret);
    }

    let mut mac = HmacMd5::new_from_slice(secret.as_bytes()).map_err(|e| {
        ConfigError::InvalidValue {
            field: "secret",
            reason: e.to_string(),
        }
    })?;
    for value in fields.values() {
        mac.update(value.as_bytes());
    }
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verifies a signature using constant-time comparison.
pub fn verify(fields: &FieldSet, secret: &str, signature: &str) -> Result<bool, ConfigError> {
    let expected = sign(fields, secret)?;
    Ok(expected.as_bytes().ct_eq(signature.as_bytes()).into())
}
