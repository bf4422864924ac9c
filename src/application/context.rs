use crate::domain::ports::{AuthService, FormInput, WalletService};
use crate::domain::slide::SlideMode;
use crate::domain::user::{DEFAULT_CURRENCY_CODE, DEFAULT_CURRENCY_SYMBOL, Merchant, PosUser};
use crate::domain::wallet::Wallet;
use crate::error::Result;
use tokio::sync::OnceCell;
use tracing::debug;

pub const USERNAME_FIELD: &str = "username";

/// Username typed on the kiosk, falling back to the page's route parameter.
///
/// A posted field wins even when blank, so clearing the username on the
/// form always returns the kiosk to the first slide.
pub fn resolve_username(input: &dyn FormInput) -> Option<&str> {
    input
        .post(USERNAME_FIELD)
        .or_else(|| input.param(USERNAME_FIELD))
        .filter(|username| !username.is_empty())
}

/// Everything the terminal derives about the person at the kiosk during one
/// request.
///
/// Lookups against the auth and wallet services run at most once per
/// context. Build a new context after anything that changes the session.
pub struct RequestContext<'a> {
    auth: &'a dyn AuthService,
    wallets: &'a dyn WalletService,
    input: &'a dyn FormInput,
    pos_user: OnceCell<Option<PosUser>>,
    pos_wallet: OnceCell<Option<Wallet>>,
}

impl<'a> RequestContext<'a> {
    pub fn new(
        auth: &'a dyn AuthService,
        wallets: &'a dyn WalletService,
        input: &'a dyn FormInput,
    ) -> Self {
        Self {
            auth,
            wallets,
            input,
            pos_user: OnceCell::new(),
            pos_wallet: OnceCell::new(),
        }
    }

    pub fn input(&self) -> &'a dyn FormInput {
        self.input
    }

    /// See [`resolve_username`].
    pub fn username(&self) -> Option<&'a str> {
        resolve_username(self.input)
    }

    /// The session's user, but only while it matches the submitted username.
    ///
    /// A kiosk handed to another operator keeps the old session until they
    /// sign in, so the stored POS username has to match exactly.
    pub async fn pos_user(&self) -> Result<Option<&PosUser>> {
        let user = self
            .pos_user
            .get_or_try_init(|| self.resolve_pos_user())
            .await?;
        Ok(user.as_ref())
    }

    async fn resolve_pos_user(&self) -> Result<Option<PosUser>> {
        let Some(user) = self.auth.get_user().await? else {
            return Ok(None);
        };

        let Some(username) = self.username() else {
            return Ok(None);
        };

        if user.pos_username != username {
            debug!(
                session_user = %user.pos_username,
                submitted = %username,
                "Session user does not match submitted username"
            );
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Merchant that owns the signed-in kiosk user.
    pub async fn merchant(&self) -> Result<Option<&Merchant>> {
        Ok(self.pos_user().await?.map(|user| &user.owner))
    }

    /// The merchant's active wallet, if someone is signed in and one exists.
    pub async fn pos_wallet(&self) -> Result<Option<&Wallet>> {
        let wallet = self
            .pos_wallet
            .get_or_try_init(|| self.resolve_pos_wallet())
            .await?;
        Ok(wallet.as_ref())
    }

    async fn resolve_pos_wallet(&self) -> Result<Option<Wallet>> {
        match self.merchant().await? {
            Some(owner) => self.wallets.find_active(owner).await,
            None => Ok(None),
        }
    }

    /// Fiat currency the kiosk prices in. Falls back to USD when nobody is
    /// signed in.
    pub async fn currency_code(&self) -> Result<&str> {
        Ok(self
            .pos_user()
            .await?
            .map(PosUser::currency_code)
            .unwrap_or(DEFAULT_CURRENCY_CODE))
    }

    /// Symbol shown next to fiat amounts, `$` when nobody is signed in.
    pub async fn currency_symbol(&self) -> Result<&str> {
        Ok(self
            .pos_user()
            .await?
            .map(PosUser::currency_symbol)
            .unwrap_or(DEFAULT_CURRENCY_SYMBOL))
    }

    /// Slide the kiosk opens on for this request.
    pub async fn slide_mode(&self) -> Result<SlideMode> {
        let has_username = self.username().is_some();
        let has_user = self.pos_user().await?.is_some();
        Ok(SlideMode::detect(has_username, has_user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::request::Request;

    #[test]
    fn test_resolve_username_prefers_post() {
        let request = Request::new()
            .with_post("username", "carol")
            .with_param("username", "bob");
        assert_eq!(resolve_username(&request), Some("carol"));
    }

    #[test]
    fn test_resolve_username_falls_back_to_route() {
        let request = Request::new().with_param("username", "bob");
        assert_eq!(resolve_username(&request), Some("bob"));
    }

    #[test]
    fn test_blank_posted_username_wins_over_route() {
        let request = Request::new()
            .with_post("username", "")
            .with_param("username", "bob");
        assert_eq!(resolve_username(&request), None);
    }

    #[test]
    fn test_resolve_username_missing() {
        assert_eq!(resolve_username(&Request::new()), None);
    }
}
