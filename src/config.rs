//! Terminal fixture file: the merchants, kiosk users, wallets, exchange
//! rates and observed balances the in-memory services start with.

use crate::domain::user::{Merchant, PosUser};
use crate::domain::wallet::Wallet;
use crate::error::{PosError, Result};
use crate::infrastructure::in_memory::{
    InMemoryAuthService, InMemorySaleService, InMemoryWalletService,
};
use crate::infrastructure::rates::FixedRateConverter;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Default route template of the terminal page.
pub const DEFAULT_PAGE_URL: &str = "/pos/:username?";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PosUserFixture {
    pub id: u32,
    pub owner_id: u32,
    pub pos_username: String,
    pub pin: String,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub currency_symbol: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TerminalFixtures {
    #[serde(default)]
    pub merchants: Vec<Merchant>,
    #[serde(default)]
    pub pos_users: Vec<PosUserFixture>,
    #[serde(default)]
    pub wallets: Vec<Wallet>,
    /// Units of each currency per unit of a shared base currency.
    #[serde(default)]
    pub rates: HashMap<String, Decimal>,
    /// Balances already observed at wallet addresses.
    #[serde(default)]
    pub balances: HashMap<String, String>,
}

impl TerminalFixtures {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let fixtures: Self = serde_json::from_reader(reader)?;
        fixtures.validate()?;
        Ok(fixtures)
    }

    fn validate(&self) -> Result<()> {
        let merchant_ids: HashSet<u32> = self.merchants.iter().map(|m| m.id).collect();

        let mut usernames = HashSet::new();
        for user in &self.pos_users {
            if user.pos_username.is_empty() {
                return Err(PosError::Config(format!("POS user {} has no username", user.id)));
            }
            if !usernames.insert(user.pos_username.as_str()) {
                return Err(PosError::Config(format!(
                    "Duplicate POS username: {}",
                    user.pos_username
                )));
            }
            if !merchant_ids.contains(&user.owner_id) {
                return Err(PosError::Config(format!(
                    "POS user {} belongs to unknown merchant {}",
                    user.pos_username, user.owner_id
                )));
            }
        }

        for wallet in &self.wallets {
            if !merchant_ids.contains(&wallet.owner_id) {
                return Err(PosError::Config(format!(
                    "Wallet {} belongs to unknown merchant {}",
                    wallet.id, wallet.owner_id
                )));
            }
        }

        if let Some((code, _)) = self.rates.iter().find(|(_, rate)| **rate <= Decimal::ZERO) {
            return Err(PosError::Config(format!("Rate for {code} must be positive")));
        }

        Ok(())
    }

    fn merchant(&self, id: u32) -> Option<&Merchant> {
        self.merchants.iter().find(|merchant| merchant.id == id)
    }

    pub fn auth_service(&self) -> Result<InMemoryAuthService> {
        let users = self
            .pos_users
            .iter()
            .map(|fixture| {
                let owner = self.merchant(fixture.owner_id).cloned().ok_or_else(|| {
                    PosError::Config(format!("Unknown merchant {}", fixture.owner_id))
                })?;
                let user = PosUser {
                    id: fixture.id,
                    pos_username: fixture.pos_username.clone(),
                    currency_code: fixture.currency_code.clone(),
                    currency_symbol: fixture.currency_symbol.clone(),
                    owner,
                };
                Ok((user, fixture.pin.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(InMemoryAuthService::with_users(users))
    }

    pub fn wallet_service(&self) -> InMemoryWalletService {
        InMemoryWalletService::with_wallets(self.wallets.clone())
    }

    pub fn sale_service(&self, wallets: InMemoryWalletService) -> InMemorySaleService {
        InMemorySaleService::with_balances(wallets, self.balances.clone())
    }

    pub fn converter(&self) -> FixedRateConverter {
        FixedRateConverter::new(self.rates.clone())
    }
}
