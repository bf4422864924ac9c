//! Amount parsing and the display rules for coin amounts.

use crate::error::{PosError, Result};
use rust_decimal::Decimal;

pub const KEYPAD_FIELD: &str = "keypad_value";
pub const NO_AMOUNT_ENTERED: &str = "No amount entered";

/// Converts the raw keypad value (whole cents) into a fiat amount.
///
/// `"500"` becomes `5`, `"550"` becomes `5.5`. Only plain digit strings
/// are cents; blank, zero, signed, fractional, exponent and separated input
/// are all rejected as no amount.
pub fn fiat_from_keypad(keypad_value: Option<&str>) -> Result<Decimal> {
    let raw = keypad_value.map(str::trim).unwrap_or_default();

    let cents = if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        raw.parse::<u64>().unwrap_or(0)
    } else {
        0
    };

    if cents == 0 {
        return Err(PosError::validation(KEYPAD_FIELD, NO_AMOUNT_ENTERED));
    }

    Ok((Decimal::from(cents) / Decimal::ONE_HUNDRED).normalize())
}

/// Drops trailing zeros after the decimal point, and the point itself when
/// nothing is left behind it. Integer digits are never touched.
pub fn trim_coin_amount(amount: &str) -> String {
    if !amount.contains('.') {
        return amount.to_string();
    }

    amount
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Display form of a coin amount with at least one fraction digit.
pub fn format_nice_amount(amount: &str) -> String {
    if !amount.contains('.') {
        return format!("{amount}.0");
    }

    let mut nice = amount.trim_end_matches('0').to_string();
    if nice.ends_with('.') {
        nice.push('0');
    }
    nice
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fiat_from_keypad_cents() {
        assert_eq!(fiat_from_keypad(Some("500")).unwrap(), dec!(5));
        assert_eq!(fiat_from_keypad(Some("550")).unwrap(), dec!(5.5));
        assert_eq!(fiat_from_keypad(Some("1")).unwrap(), dec!(0.01));
        assert_eq!(fiat_from_keypad(Some(" 1999 ")).unwrap(), dec!(19.99));
    }

    #[test]
    fn test_fiat_from_keypad_normalizes_scale() {
        assert_eq!(fiat_from_keypad(Some("500")).unwrap().to_string(), "5");
        assert_eq!(fiat_from_keypad(Some("1000")).unwrap().to_string(), "10");
    }

    #[test]
    fn test_fiat_from_keypad_rejects_missing_amount() {
        for input in [
            None,
            Some(""),
            Some("0"),
            Some("000"),
            Some("abc"),
            Some("-500"),
            Some("+500"),
            Some("5_00"),
            Some("1e3"),
            Some("12.5"),
            Some("500abc"),
            Some("99999999999999999999999"),
        ] {
            let err = fiat_from_keypad(input).unwrap_err();
            assert_eq!(err.field(), Some(KEYPAD_FIELD), "input {input:?}");
            assert_eq!(err.user_message(), NO_AMOUNT_ENTERED);
        }
    }

    #[test]
    fn test_trim_coin_amount_keeps_integer_digits() {
        assert_eq!(trim_coin_amount("0.01250000"), "0.0125");
        assert_eq!(trim_coin_amount("10.00000000"), "10");
        assert_eq!(trim_coin_amount("10"), "10");
        assert_eq!(trim_coin_amount("100.50000000"), "100.5");
    }

    #[test]
    fn test_format_nice_amount() {
        assert_eq!(format_nice_amount("5"), "5.0");
        assert_eq!(format_nice_amount("5.100"), "5.1");
        assert_eq!(format_nice_amount("5.00"), "5.0");
        assert_eq!(format_nice_amount("10"), "10.0");
        assert_eq!(format_nice_amount("10.00"), "10.0");
        assert_eq!(format_nice_amount("0.00012"), "0.00012");
    }
}
