use crate::domain::ports::{AuthService, SaleService, WalletService};
use crate::domain::sale::{Sale, SaleOptions};
use crate::domain::user::{Credentials, Merchant, PosUser};
use crate::domain::wallet::Wallet;
use crate::error::{PosError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
struct StoredPosUser {
    user: PosUser,
    pin: String,
}

/// POS users with their PINs plus the kiosk's signed-in session.
///
/// Clones share the same users and session, the way every request on a
/// kiosk shares one browser session.
#[derive(Default, Clone)]
pub struct InMemoryAuthService {
    users: Arc<RwLock<HashMap<String, StoredPosUser>>>,
    session: Arc<RwLock<Option<String>>>,
}

impl InMemoryAuthService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users<I, P>(users: I) -> Self
    where
        I: IntoIterator<Item = (PosUser, P)>,
        P: Into<String>,
    {
        let users = users
            .into_iter()
            .map(|(user, pin)| {
                let key = user.pos_username.clone();
                (
                    key,
                    StoredPosUser {
                        user,
                        pin: pin.into(),
                    },
                )
            })
            .collect();

        Self {
            users: Arc::new(RwLock::new(users)),
            session: Arc::default(),
        }
    }

    pub async fn register(&self, user: PosUser, pin: impl Into<String>) {
        let mut users = self.users.write().await;
        users.insert(
            user.pos_username.clone(),
            StoredPosUser {
                user,
                pin: pin.into(),
            },
        );
    }

    /// Ends the kiosk session.
    pub async fn sign_out(&self) {
        *self.session.write().await = None;
    }
}

#[async_trait]
impl AuthService for InMemoryAuthService {
    async fn find_user_by_login(&self, username: &str) -> Result<Option<PosUser>> {
        let users = self.users.read().await;
        Ok(users.get(username).map(|stored| stored.user.clone()))
    }

    async fn authenticate(&self, credentials: Credentials) -> Result<()> {
        let matched = {
            let users = self.users.read().await;
            users
                .get(&credentials.username)
                .is_some_and(|stored| !stored.pin.is_empty() && stored.pin == credentials.pin)
        };

        if !matched {
            warn!(username = %credentials.username, "Rejected kiosk credentials");
            return Err(PosError::Auth(
                "A user was not found with the given credentials".to_string(),
            ));
        }

        *self.session.write().await = Some(credentials.username);
        Ok(())
    }

    async fn get_user(&self) -> Result<Option<PosUser>> {
        let session = self.session.read().await;
        let Some(username) = session.as_deref() else {
            return Ok(None);
        };

        let users = self.users.read().await;
        Ok(users.get(username).map(|stored| stored.user.clone()))
    }
}

/// Merchant wallets, kept in registration order.
#[derive(Default, Clone)]
pub struct InMemoryWalletService {
    wallets: Arc<RwLock<Vec<Wallet>>>,
}

impl InMemoryWalletService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wallets(wallets: impl IntoIterator<Item = Wallet>) -> Self {
        Self {
            wallets: Arc::new(RwLock::new(wallets.into_iter().collect())),
        }
    }

    pub async fn add(&self, wallet: Wallet) {
        self.wallets.write().await.push(wallet);
    }

    /// Retires a wallet so it is no longer handed out as active.
    pub async fn deactivate(&self, wallet_id: u32) {
        let mut wallets = self.wallets.write().await;
        for wallet in wallets.iter_mut().filter(|wallet| wallet.id == wallet_id) {
            wallet.is_active = false;
        }
    }
}

#[async_trait]
impl WalletService for InMemoryWalletService {
    async fn find_active(&self, owner: &Merchant) -> Result<Option<Wallet>> {
        let wallets = self.wallets.read().await;
        Ok(wallets
            .iter()
            .find(|wallet| wallet.owner_id == owner.id && wallet.is_active)
            .cloned())
    }
}

/// Sales keyed by hash, with an address ledger standing in for the chain.
///
/// `check_balance` only confirms addresses the ledger has seen; anything
/// else is reported as unconfirmed so the terminal asks for a refresh.
#[derive(Clone)]
pub struct InMemorySaleService {
    wallets: InMemoryWalletService,
    sales: Arc<RwLock<HashMap<String, Sale>>>,
    next_index: Arc<RwLock<HashMap<u32, u32>>>,
    ledger: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemorySaleService {
    pub fn new(wallets: InMemoryWalletService) -> Self {
        Self {
            wallets,
            sales: Arc::default(),
            next_index: Arc::default(),
            ledger: Arc::default(),
        }
    }

    pub fn with_balances<I, A, B>(wallets: InMemoryWalletService, balances: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        let ledger = balances
            .into_iter()
            .map(|(address, balance)| (address.into(), balance.into()))
            .collect();

        Self {
            ledger: Arc::new(RwLock::new(ledger)),
            ..Self::new(wallets)
        }
    }

    /// Records the amount observed at an address.
    pub async fn record_balance(&self, address: &str, balance: impl Into<String>) {
        let mut ledger = self.ledger.write().await;
        ledger.insert(address.to_string(), balance.into());
    }

    pub async fn all_sales(&self) -> Vec<Sale> {
        let sales = self.sales.read().await;
        let mut all: Vec<Sale> = sales.values().cloned().collect();
        all.sort_by_key(|sale| (sale.owner_id, sale.sale_index));
        all
    }
}

fn sale_hash(owner_id: u32, sale_index: u32) -> String {
    format!("{owner_id:06x}{sale_index:06x}")
}

#[async_trait]
impl SaleService for InMemorySaleService {
    async fn raise_sale(&self, owner: &Merchant, options: SaleOptions) -> Result<Sale> {
        let Some(wallet) = self.wallets.find_active(owner).await? else {
            return Err(PosError::application("No active wallet for this account"));
        };

        // The index is only taken once the sale can get an address.
        let (sale_index, address) = {
            let mut next_index = self.next_index.write().await;
            let index = next_index.entry(owner.id).or_insert(0);
            let sale_index = *index + 1;

            let Some(address) = wallet.address_for_index(sale_index) else {
                return Err(PosError::application("Wallet has no receiving addresses"));
            };

            *index = sale_index;
            (sale_index, address.to_string())
        };

        let sale = Sale {
            hash: sale_hash(owner.id, sale_index),
            owner_id: owner.id,
            sale_index,
            coin_address: address,
            coin_price: options.coin_price,
            coin_currency: options.coin_currency,
            fiat_price: options.fiat_price,
            fiat_currency: options.fiat_currency,
            coin_balance: "0".to_string(),
            notes: None,
            needs_refresh: false,
        };

        self.save(&sale).await?;
        Ok(sale)
    }

    async fn find_by_hash_for_user(&self, owner: &Merchant, hash: &str) -> Result<Option<Sale>> {
        let sales = self.sales.read().await;
        Ok(sales
            .get(hash)
            .filter(|sale| sale.owner_id == owner.id)
            .cloned())
    }

    async fn check_balance(&self, sale: &mut Sale) -> Result<bool> {
        let observed = {
            let ledger = self.ledger.read().await;
            ledger.get(&sale.coin_address).cloned()
        };

        let Some(balance) = observed else {
            return Ok(false);
        };

        sale.coin_balance = balance;
        sale.needs_refresh = false;
        self.save(sale).await?;
        Ok(true)
    }

    async fn touch_from_user(&self, sale: &mut Sale) -> Result<()> {
        debug!(hash = %sale.hash, "Sale flagged for balance refresh");
        sale.needs_refresh = true;
        self.save(sale).await
    }

    async fn save(&self, sale: &Sale) -> Result<()> {
        let mut sales = self.sales.write().await;
        sales.insert(sale.hash.clone(), sale.clone());
        Ok(())
    }
}
