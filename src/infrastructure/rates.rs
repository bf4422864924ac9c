use crate::domain::ports::{ConversionOptions, CurrencyConverter};
use crate::error::{PosError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Converts between currencies using a fixed table of rates.
///
/// Every rate is the number of units of that currency worth one unit of a
/// common base (for example `USD = 1`, `BCH = 0.0025`).
#[derive(Debug, Clone, Default)]
pub struct FixedRateConverter {
    rates: HashMap<String, Decimal>,
}

impl FixedRateConverter {
    pub fn new<I, S>(rates: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        Self {
            rates: rates
                .into_iter()
                .map(|(code, rate)| (code.into().to_uppercase(), rate))
                .collect(),
        }
    }

    fn rate(&self, code: &str) -> Result<Decimal> {
        self.rates
            .get(&code.to_uppercase())
            .copied()
            .filter(|rate| *rate > Decimal::ZERO)
            .ok_or_else(|| PosError::application(format!("Unsupported currency: {code}")))
    }
}

#[async_trait]
impl CurrencyConverter for FixedRateConverter {
    async fn convert(&self, amount: Decimal, options: &ConversionOptions) -> Result<String> {
        let from = self.rate(&options.from)?;
        let to = self.rate(&options.to)?;

        let converted = amount
            .checked_div(from)
            .and_then(|base| base.checked_mul(to))
            .ok_or_else(|| PosError::application("Amount is out of range"))?
            .round_dp(options.decimals);

        Ok(format!("{:.*}", options.decimals as usize, converted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn to_bch(from: &str) -> ConversionOptions {
        ConversionOptions {
            from: from.to_string(),
            to: "BCH".to_string(),
            decimals: 8,
        }
    }

    #[tokio::test]
    async fn test_convert_pads_to_decimals() {
        let converter = FixedRateConverter::new([("USD", dec!(1)), ("BCH", dec!(0.0025))]);
        let coin = converter.convert(dec!(5), &to_bch("USD")).await.unwrap();
        assert_eq!(coin, "0.01250000");
    }

    #[tokio::test]
    async fn test_convert_between_fiat_currencies() {
        let converter = FixedRateConverter::new([
            ("USD", dec!(1)),
            ("EUR", dec!(0.8)),
            ("BCH", dec!(0.0025)),
        ]);
        let coin = converter.convert(dec!(8), &to_bch("eur")).await.unwrap();
        assert_eq!(coin, "0.02500000");
    }

    #[tokio::test]
    async fn test_convert_rounds_to_decimals() {
        let converter = FixedRateConverter::new([("USD", dec!(3)), ("BCH", dec!(1))]);
        let coin = converter.convert(dec!(1), &to_bch("USD")).await.unwrap();
        assert_eq!(coin, "0.33333333");
    }

    #[tokio::test]
    async fn test_convert_unknown_currency() {
        let converter = FixedRateConverter::new([("BCH", dec!(0.0025))]);
        let err = converter.convert(dec!(5), &to_bch("GBP")).await.unwrap_err();
        assert_eq!(err.user_message(), "Unsupported currency: GBP");
    }
}
