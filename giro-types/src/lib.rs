//! # Giro Types
//!
//! Domain types and port traits for the GiroCheckout gateway client.
//! This crate has no IO dependencies - only data structures, the field
//! stringification rules, and trait definitions.
//!
//! ## Layout
//!
//! - `domain/` - Credentials, transaction context, ordered field sets, outcomes
//! - `ports/` - Trait definitions that transport adapters implement
//! - `error/` - Configuration and transport error types

pub mod domain;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    AccountCredentials, Action, CardBrand, FieldSet, FieldValue, GatewayConfig, MoneyFormat,
    Outcome, Pkn, ReferenceToken, StartOptions, TransactionContext, TransactionOverrides,
    TransactionType,
};
pub use error::{ConfigError, TransportError};
pub use ports::Transport;
