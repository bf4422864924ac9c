use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Coin every kiosk sale is priced in.
pub const SALE_COIN_CURRENCY: &str = "BCH";

/// A payment request raised from the kiosk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub hash: String,
    pub owner_id: u32,
    pub sale_index: u32,
    pub coin_address: String,
    pub coin_price: String,
    pub coin_currency: String,
    pub fiat_price: Decimal,
    pub fiat_currency: String,
    /// Amount received at `coin_address`, as last observed.
    pub coin_balance: String,
    pub notes: Option<String>,
    /// Set when the operator asked for a manual balance refresh.
    #[serde(default)]
    pub needs_refresh: bool,
}

/// Pricing for a new sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleOptions {
    pub coin_price: String,
    pub fiat_price: Decimal,
    pub coin_currency: String,
    pub fiat_currency: String,
}
