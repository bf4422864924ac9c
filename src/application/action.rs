use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::PosError;

/// Page handlers the hosting page can invoke on the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Action {
    #[serde(rename = "onRun")]
    Run,
    #[serde(rename = "onCheckUsername")]
    CheckUsername,
    #[serde(rename = "onCheckPin")]
    CheckPin,
    #[serde(rename = "onRevertAmount")]
    RevertAmount,
    #[serde(rename = "onConfirmAmount")]
    ConfirmAmount,
    #[serde(rename = "onSubmitAmount")]
    SubmitAmount,
    #[serde(rename = "onCheckPayment")]
    CheckPayment,
    #[serde(rename = "onLaunchSalesNotes")]
    LaunchSalesNotes,
    #[serde(rename = "onSaveSaleNotes")]
    SaveSaleNotes,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Action::Run,
        Action::CheckUsername,
        Action::CheckPin,
        Action::RevertAmount,
        Action::ConfirmAmount,
        Action::SubmitAmount,
        Action::CheckPayment,
        Action::LaunchSalesNotes,
        Action::SaveSaleNotes,
    ];

    pub fn handler_name(&self) -> &'static str {
        match self {
            Action::Run => "onRun",
            Action::CheckUsername => "onCheckUsername",
            Action::CheckPin => "onCheckPin",
            Action::RevertAmount => "onRevertAmount",
            Action::ConfirmAmount => "onConfirmAmount",
            Action::SubmitAmount => "onSubmitAmount",
            Action::CheckPayment => "onCheckPayment",
            Action::LaunchSalesNotes => "onLaunchSalesNotes",
            Action::SaveSaleNotes => "onSaveSaleNotes",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.handler_name())
    }
}

impl FromStr for Action {
    type Err = PosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.handler_name() == s)
            .ok_or_else(|| PosError::application(format!("Unknown handler: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_handler_name() {
        assert_eq!("onCheckPin".parse::<Action>().unwrap(), Action::CheckPin);
        assert_eq!(
            "onSaveSaleNotes".parse::<Action>().unwrap(),
            Action::SaveSaleNotes
        );
    }

    #[test]
    fn test_unknown_handler() {
        let err = "onDeleteEverything".parse::<Action>().unwrap_err();
        assert_eq!(err.kind(), "application");
    }
}
