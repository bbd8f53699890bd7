//! # Giro Gateway
//!
//! The transaction-lifecycle protocol of the GiroCheckout API:
//! - `signature` - canonicalization and HMAC-MD5 request signatures
//! - `request` - the start, capture, refund and void request shapes
//! - `response` - mapping of replies onto an [`Outcome`](giro_types::Outcome)
//! - `gateway` - [`GatewayClient`], which builds, submits and interprets
//!
//! The client is generic over a [`Transport`](giro_types::Transport) port;
//! the HTTP adapter lives in `giro-http`.

pub mod error;
pub mod gateway;
pub mod request;
pub mod response;
pub mod signature;

pub use error::GatewayError;
pub use gateway::GatewayClient;
pub use request::SignedRequest;
