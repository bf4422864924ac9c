use super::sale::{Sale, SaleOptions};
use super::user::{Credentials, Merchant, PosUser};
use super::wallet::Wallet;
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;

/// Kiosk user lookup and the session's authenticated identity.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn find_user_by_login(&self, username: &str) -> Result<Option<PosUser>>;
    /// Fails with `PosError::Auth` on bad credentials.
    async fn authenticate(&self, credentials: Credentials) -> Result<()>;
    async fn get_user(&self) -> Result<Option<PosUser>>;
}

#[async_trait]
pub trait SaleService: Send + Sync {
    async fn raise_sale(&self, owner: &Merchant, options: SaleOptions) -> Result<Sale>;
    async fn find_by_hash_for_user(&self, owner: &Merchant, hash: &str) -> Result<Option<Sale>>;
    /// Refreshes `coin_balance`; `false` when the balance could not be confirmed.
    async fn check_balance(&self, sale: &mut Sale) -> Result<bool>;
    /// Requests a priority re-check of the sale's address.
    async fn touch_from_user(&self, sale: &mut Sale) -> Result<()>;
    async fn save(&self, sale: &Sale) -> Result<()>;
}

#[async_trait]
pub trait WalletService: Send + Sync {
    async fn find_active(&self, owner: &Merchant) -> Result<Option<Wallet>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOptions {
    pub from: String,
    pub to: String,
    pub decimals: u32,
}

#[async_trait]
pub trait CurrencyConverter: Send + Sync {
    /// Converts and formats `amount` with exactly `options.decimals` fraction digits.
    async fn convert(&self, amount: Decimal, options: &ConversionOptions) -> Result<String>;
}

/// Read access to the submitted form and the page's route parameters.
pub trait FormInput {
    fn post(&self, key: &str) -> Option<&str>;
    fn param(&self, key: &str) -> Option<&str>;
}

/// Flash-style messages shown to the operator after a handler succeeds.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub location: String,
}

pub trait Redirector: Send + Sync {
    /// Redirect back to the terminal page with the given route parameters.
    fn to_current_page(&self, params: &[(&str, &str)]) -> Redirect;
}

pub type AuthServiceBox = Box<dyn AuthService>;
pub type SaleServiceBox = Box<dyn SaleService>;
pub type WalletServiceBox = Box<dyn WalletService>;
pub type CurrencyConverterBox = Box<dyn CurrencyConverter>;
pub type NotifierBox = Box<dyn Notifier>;
pub type RedirectorBox = Box<dyn Redirector>;
