//! Domain models for the gateway client.

pub mod account;
pub mod fields;
pub mod gateway;
pub mod outcome;
pub mod transaction;

pub use account::{AccountCredentials, GatewayConfig};
pub use fields::{FieldSet, FieldValue};
pub use gateway::{CardBrand, MoneyFormat};
pub use outcome::Outcome;
pub use transaction::{
    Action, Pkn, ReferenceToken, StartOptions, TransactionContext, TransactionOverrides,
    TransactionType,
};
