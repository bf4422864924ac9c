use crate::application::action::Action;
use crate::application::context::{RequestContext, USERNAME_FIELD, resolve_username};
use crate::application::page::{Page, Response};
use crate::domain::amount::{KEYPAD_FIELD, fiat_from_keypad, format_nice_amount, trim_coin_amount};
use crate::domain::ports::{
    AuthServiceBox, ConversionOptions, CurrencyConverterBox, FormInput, NotifierBox, Redirect,
    RedirectorBox, SaleServiceBox, WalletServiceBox,
};
use crate::domain::sale::{SALE_COIN_CURRENCY, Sale, SaleOptions};
use crate::domain::slide::{SlideMode, StatusState};
use crate::domain::user::Credentials;
use crate::error::{PosError, Result};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Fraction digits coin prices are quoted with.
pub const COIN_DECIMALS: u32 = 8;

const SALE_HASH_FIELD: &str = "sale_hash";
const NOTES_FIELD: &str = "notes";

/// The point-of-sale kiosk.
///
/// Walks the operator through username, PIN, amount and confirmation, then
/// raises a sale and lets the page poll it until the customer has paid.
/// Every handler works from a fresh `RequestContext`; nothing about the
/// operator is kept on the terminal itself.
pub struct PosTerminal {
    auth: AuthServiceBox,
    sales: SaleServiceBox,
    wallets: WalletServiceBox,
    converter: CurrencyConverterBox,
    notifier: NotifierBox,
    redirector: RedirectorBox,
}

impl PosTerminal {
    /// Builds a terminal over the services the hosting page provides.
    pub fn new(
        auth: AuthServiceBox,
        sales: SaleServiceBox,
        wallets: WalletServiceBox,
        converter: CurrencyConverterBox,
        notifier: NotifierBox,
        redirector: RedirectorBox,
    ) -> Self {
        Self {
            auth,
            sales,
            wallets,
            converter,
            notifier,
            redirector,
        }
    }

    /// Runs the named page handler, the way the hosting page dispatches
    /// form submissions.
    pub async fn dispatch(&self, action: Action, input: &dyn FormInput) -> Result<Response> {
        debug!(%action, "Dispatching handler");
        match action {
            Action::Run => self.on_run(input).await.map(Response::from),
            Action::CheckUsername => self.on_check_username(input).await.map(Response::from),
            Action::CheckPin => self.on_check_pin(input).await.map(Response::from),
            Action::RevertAmount => self.on_revert_amount(input).await.map(Response::from),
            Action::ConfirmAmount => self.on_confirm_amount(input).await.map(Response::from),
            Action::SubmitAmount => self.on_submit_amount(input).await.map(Response::from),
            Action::CheckPayment => self.on_check_payment(input).await.map(Response::from),
            Action::LaunchSalesNotes => self.on_launch_sales_notes(input).await.map(Response::from),
            Action::SaveSaleNotes => self.on_save_sale_notes(input).await.map(Response::from),
        }
    }

    pub fn context<'a>(&'a self, input: &'a dyn FormInput) -> RequestContext<'a> {
        RequestContext::new(self.auth.as_ref(), self.wallets.as_ref(), input)
    }

    /// Initial page render.
    pub async fn on_run(&self, input: &dyn FormInput) -> Result<Page> {
        self.prepare_vars(&self.context(input)).await
    }

    async fn prepare_vars(&self, ctx: &RequestContext<'_>) -> Result<Page> {
        let slide_mode = ctx.slide_mode().await?;
        debug!(%slide_mode, "Prepared terminal page");

        Ok(Page {
            pos_username: ctx.username().map(str::to_string),
            pos_user: ctx.pos_user().await?.cloned(),
            pos_wallet: ctx.pos_wallet().await?.cloned(),
            slide_mode: Some(slide_mode),
            currency_code: Some(ctx.currency_code().await?.to_string()),
            currency_symbol: Some(ctx.currency_symbol().await?.to_string()),
            ..Default::default()
        })
    }

    /// Checks the typed username exists and sends the kiosk to that user's
    /// own terminal URL. Signing in happens on the next slide.
    pub async fn on_check_username(&self, input: &dyn FormInput) -> Result<Redirect> {
        let username = input.post(USERNAME_FIELD).unwrap_or_default();

        if username.is_empty() {
            return Err(PosError::validation(
                USERNAME_FIELD,
                "The username field is required",
            ));
        }

        if self.auth.find_user_by_login(username).await?.is_none() {
            warn!(%username, "Unknown kiosk username");
            return Err(PosError::validation(
                USERNAME_FIELD,
                "Unable to find that account",
            ));
        }

        Ok(self
            .redirector
            .to_current_page(&[(USERNAME_FIELD, username)]))
    }

    /// Signs the kiosk user in with the PIN typed on the keypad and renders
    /// the amount slide. A wrong PIN surfaces as an auth error.
    pub async fn on_check_pin(&self, input: &dyn FormInput) -> Result<Page> {
        let credentials = Credentials {
            username: resolve_username(input).unwrap_or_default().to_string(),
            pin: input.post(KEYPAD_FIELD).unwrap_or_default().to_string(),
        };
        let username = credentials.username.clone();

        self.auth.authenticate(credentials).await?;
        info!(%username, "Kiosk user authenticated");

        self.notifier.success("Authentication successful");

        // The session changed, so nothing resolved before signing in holds.
        self.prepare_vars(&self.context(input)).await
    }

    /// Backs out of the confirm slide to amount entry.
    pub async fn on_revert_amount(&self, input: &dyn FormInput) -> Result<Page> {
        self.prepare_vars(&self.context(input)).await
    }

    /// Shows the fiat and coin amounts for the operator to confirm.
    pub async fn on_confirm_amount(&self, input: &dyn FormInput) -> Result<Page> {
        let ctx = self.context(input);
        let mut page = self.prepare_vars(&ctx).await?;
        self.set_amounts_from_keypad(&ctx, &mut page).await?;

        page.slide_mode = Some(SlideMode::Confirm);
        page.screen_mode = Some(SlideMode::Confirm);
        Ok(page)
    }

    /// Raises a sale for the confirmed amount against the merchant's active
    /// wallet and moves the kiosk to the transaction slide.
    pub async fn on_submit_amount(&self, input: &dyn FormInput) -> Result<Page> {
        let ctx = self.context(input);
        let mut page = self.prepare_vars(&ctx).await?;
        let (fiat_amount, coin_amount) = self.set_amounts_from_keypad(&ctx, &mut page).await?;

        let Some(owner) = ctx.merchant().await? else {
            return Err(PosError::application("Invalid user account"));
        };

        let options = SaleOptions {
            coin_price: coin_amount,
            fiat_price: fiat_amount,
            coin_currency: SALE_COIN_CURRENCY.to_string(),
            fiat_currency: ctx.currency_code().await?.to_string(),
        };

        let sale = self.sales.raise_sale(owner, options).await?;
        info!(
            sale_index = sale.sale_index,
            address = %sale.coin_address,
            coin_price = %sale.coin_price,
            "Raised sale"
        );

        page.sale_index = Some(sale.sale_index);
        page.address = Some(sale.coin_address.clone());
        page.sale = Some(sale);
        page.slide_mode = Some(SlideMode::Transaction);
        page.status_state = Some(StatusState::Presend);
        Ok(page)
    }

    /// Reads the keypad, converts it to coin and puts both on the page.
    async fn set_amounts_from_keypad(
        &self,
        ctx: &RequestContext<'_>,
        page: &mut Page,
    ) -> Result<(Decimal, String)> {
        let (fiat_amount, coin_amount) = self.derive_amounts(ctx).await?;
        page.amount = Some(fiat_amount);
        page.amount_coin = Some(coin_amount.clone());
        Ok((fiat_amount, coin_amount))
    }

    async fn derive_amounts(&self, ctx: &RequestContext<'_>) -> Result<(Decimal, String)> {
        let fiat_amount = fiat_from_keypad(ctx.input().post(KEYPAD_FIELD))?;

        let options = ConversionOptions {
            from: ctx.currency_code().await?.to_string(),
            to: SALE_COIN_CURRENCY.to_string(),
            decimals: COIN_DECIMALS,
        };
        let coin_amount = self.converter.convert(fiat_amount, &options).await?;

        Ok((fiat_amount, trim_coin_amount(&coin_amount)))
    }

    /// Polled by the transaction slide until the sale is paid.
    pub async fn on_check_payment(&self, input: &dyn FormInput) -> Result<Page> {
        let ctx = self.context(input);
        let mut sale = self.require_sale(&ctx).await?;

        if !self.sales.check_balance(&mut sale).await? {
            debug!(sale_index = sale.sale_index, "Balance unconfirmed, requesting refresh");
            self.sales.touch_from_user(&mut sale).await?;
        }

        Ok(Page {
            amount_coin: Some(format_nice_amount(&sale.coin_price)),
            balance: Some(format_nice_amount(&sale.coin_balance)),
            address: Some(sale.coin_address.clone()),
            sale: Some(sale),
            ..Default::default()
        })
    }

    /// Opens the notes editor for the posted sale.
    pub async fn on_launch_sales_notes(&self, input: &dyn FormInput) -> Result<Page> {
        let sale = self.require_sale(&self.context(input)).await?;

        Ok(Page {
            sale: Some(sale),
            ..Default::default()
        })
    }

    /// Stores the posted notes on the sale. Leaving the field out clears them.
    pub async fn on_save_sale_notes(&self, input: &dyn FormInput) -> Result<Page> {
        let mut sale = self.require_sale(&self.context(input)).await?;

        sale.notes = input.post(NOTES_FIELD).map(str::to_string);
        self.sales.save(&sale).await?;
        info!(sale_index = sale.sale_index, "Sale notes updated");

        self.notifier.success("Notes updated");

        Ok(Page {
            sale: Some(sale),
            ..Default::default()
        })
    }

    async fn require_sale(&self, ctx: &RequestContext<'_>) -> Result<Sale> {
        self.find_sale_from_hash(ctx, None)
            .await?
            .ok_or_else(|| PosError::application("Unable to find sale"))
    }

    /// Looks up one of the signed-in merchant's sales. The hash defaults to
    /// the posted `sale_hash` field.
    pub async fn find_sale_from_hash(
        &self,
        ctx: &RequestContext<'_>,
        hash: Option<&str>,
    ) -> Result<Option<Sale>> {
        let hash = hash
            .or_else(|| ctx.input().post(SALE_HASH_FIELD))
            .unwrap_or_default();

        let Some(owner) = ctx.merchant().await? else {
            return Err(PosError::application("Invalid user account"));
        };

        let sale = self.sales.find_by_hash_for_user(owner, hash).await?;
        if sale.is_none() {
            warn!(%hash, owner = owner.id, "Sale not found for merchant");
        }
        Ok(sale)
    }
}
