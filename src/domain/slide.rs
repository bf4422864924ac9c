use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kiosk slide the template should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideMode {
    Username,
    Auth,
    Amount,
    Confirm,
    Transaction,
}

impl SlideMode {
    /// Slide implied by what the request already carries. `Confirm` and
    /// `Transaction` are only ever reached through explicit handlers.
    pub fn detect(has_username: bool, has_user: bool) -> Self {
        if !has_username {
            SlideMode::Username
        } else if !has_user {
            SlideMode::Auth
        } else {
            SlideMode::Amount
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SlideMode::Username => "username",
            SlideMode::Auth => "auth",
            SlideMode::Amount => "amount",
            SlideMode::Confirm => "confirm",
            SlideMode::Transaction => "transaction",
        }
    }
}

impl fmt::Display for SlideMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment status on the transaction slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    /// Waiting for the customer to send coins.
    Presend,
}
