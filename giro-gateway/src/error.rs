//! Errors surfaced by gateway operations.

use giro_types::{ConfigError, TransportError};

/// Failure of a gateway call.
///
/// A well-formed reply with a non-zero result code is not an error; it is
/// an [`Outcome`](giro_types::Outcome) with `success == false`.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Malformed gateway response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to encode request: {0}")]
    Encoding(#[from] serde_urlencoded::ser::Error),
}
