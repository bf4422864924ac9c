use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY_CODE: &str = "USD";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// The merchant account that owns wallets and sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchant {
    pub id: u32,
    pub name: String,
}

/// A kiosk login identity belonging to a merchant.
///
/// Several POS users may share one merchant; sales and wallets are always
/// looked up through `owner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosUser {
    pub id: u32,
    pub pos_username: String,
    pub currency_code: Option<String>,
    pub currency_symbol: Option<String>,
    pub owner: Merchant,
}

impl PosUser {
    /// Configured fiat currency, `USD` when unset or blank.
    pub fn currency_code(&self) -> &str {
        non_blank(self.currency_code.as_deref()).unwrap_or(DEFAULT_CURRENCY_CODE)
    }

    /// Configured currency symbol, `$` when unset or blank.
    pub fn currency_symbol(&self) -> &str {
        non_blank(self.currency_symbol.as_deref()).unwrap_or(DEFAULT_CURRENCY_SYMBOL)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Username and PIN as typed on the kiosk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub pin: String,
}
