use crate::domain::ports::Redirect;
use crate::domain::sale::Sale;
use crate::domain::slide::{SlideMode, StatusState};
use crate::domain::user::PosUser;
use crate::domain::wallet::Wallet;
use rust_decimal::Decimal;
use serde::Serialize;

/// Variables handed to the terminal's page template.
///
/// Handlers only fill what they produce; unset variables are left out of
/// the serialized page so partial AJAX updates stay small.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_user: Option<PosUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_wallet: Option<Wallet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_mode: Option<SlideMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_coin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale: Option<Sale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_mode: Option<SlideMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_state: Option<StatusState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
}

/// What a handler hands back to the hosting page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    Page(Box<Page>),
    Redirect(Redirect),
}

impl From<Page> for Response {
    fn from(page: Page) -> Self {
        Response::Page(Box::new(page))
    }
}

impl From<Redirect> for Response {
    fn from(redirect: Redirect) -> Self {
        Response::Redirect(redirect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_page_serializes_only_set_variables() {
        let page = Page {
            slide_mode: Some(SlideMode::Confirm),
            amount: Some(dec!(5)),
            amount_coin: Some("0.0125".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "slideMode": "confirm",
                "amount": "5",
                "amountCoin": "0.0125",
            })
        );
    }
}
