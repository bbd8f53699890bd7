//! Static facts about the Girosolution gateway.

use serde::Serialize;

/// Production transaction endpoint base.
pub const LIVE_URL: &str = "https://payment.girosolution.de/girocheckout/api/v2/transaction/";

/// Test transaction endpoint base. Girosolution serves both modes from one host.
pub const TEST_URL: &str = "https://payment.girosolution.de/girocheckout/api/v2/transaction/";

pub const DISPLAY_NAME: &str = "girosolution.de";
pub const HOMEPAGE_URL: &str = "https://www.girosolution.de";
pub const SUPPORTED_COUNTRIES: &[&str] = &["DE"];
pub const DEFAULT_CURRENCY: &str = "EUR";
pub const SUPPORTED_CARD_BRANDS: &[CardBrand] = &[CardBrand::Visa, CardBrand::Master];
pub const MONEY_FORMAT: MoneyFormat = MoneyFormat::Cents;

/// How amounts are expressed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoneyFormat {
    /// Integer count of the currency's smallest unit.
    Cents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    Visa,
    Master,
}
