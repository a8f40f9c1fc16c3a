//! Human-readable amount parsing and settlement-unit scaling.
//!
//! User-entered amounts arrive as decimal strings (`"10.50"`, `"$1,000"`).
//! On-chain requests want integer settlement units: the amount scaled by
//! `10^decimals` for the selected currency. [`MoneyAmount`] parses the human
//! form into an exact [`Decimal`]; [`to_settlement_units`] and
//! [`to_display_units`] convert between the two representations without ever
//! touching binary floating point.
//!
//! # Example
//!
//! ```
//! use rnf_types::amount::{to_settlement_units, to_display_units};
//!
//! assert_eq!(to_settlement_units("10.5", 6).unwrap(), "10500000");
//! assert_eq!(to_display_units("10500000", 6).unwrap(), "10.5");
//! ```

use alloy_primitives::U256;
use regex::Regex;
use rust_decimal::Decimal;
use std::fmt;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::LazyLock;

/// A parsed, non-negative monetary amount with its original decimal precision.
///
/// The [`scale`](MoneyAmount::scale) method returns the number of decimal
/// places and [`mantissa`](MoneyAmount::mantissa) the value as an integer;
/// `"10.50"` has scale 2 and mantissa 1050. Both are needed when scaling to a
/// currency's settlement units.
#[derive(Debug, Clone, PartialEq)]
pub struct MoneyAmount(pub Decimal);

/// Errors from parsing or scaling a monetary amount.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// The input string could not be parsed as a number.
    #[error("Invalid number format")]
    InvalidFormat,
    /// The value is outside the allowed range.
    #[error("Amount must be between {} and {}", constants::MIN_STR, constants::MAX_STR)]
    OutOfRange,
    /// Negative values are not allowed.
    #[error("Negative value is not allowed")]
    Negative,
    /// The input has more fractional digits than the currency can represent.
    ///
    /// Only raised in strict mode; the non-strict path truncates toward zero.
    #[error("Amount has {scale} fractional digits but the currency supports {decimals}")]
    PrecisionOverflow {
        /// Fractional digits in the input.
        scale: u32,
        /// Fractional digits supported by the currency.
        decimals: u32,
    },
}

mod constants {
    use super::*;

    pub const MIN_STR: &str = "0.000000000000000001";
    pub const MAX_STR: &str = "999999999999";

    pub static MIN: LazyLock<Decimal> =
        LazyLock::new(|| Decimal::from_str(MIN_STR).expect("valid decimal"));
    pub static MAX: LazyLock<Decimal> =
        LazyLock::new(|| Decimal::from_str(MAX_STR).expect("valid decimal"));
}

static SCRUB_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\d\.\-]+").expect("valid scrub regex"));

impl MoneyAmount {
    /// Parses a human-readable amount string.
    ///
    /// Currency symbols, thousand separators, and whitespace are stripped
    /// before parsing. The result must be zero or a positive number within
    /// the allowed range.
    ///
    /// # Errors
    ///
    /// Returns an error if the string cannot be parsed as a number, the
    /// value is negative, or a non-zero value falls outside the allowed
    /// range.
    pub fn parse(input: &str) -> Result<Self, AmountError> {
        let cleaned = SCRUB_REGEX.replace_all(input, "");

        let parsed = Decimal::from_str(&cleaned).map_err(|_| AmountError::InvalidFormat)?;

        if parsed.is_sign_negative() {
            return Err(AmountError::Negative);
        }

        // Zero is a legitimate draft value (unfilled unit price, free line).
        if !parsed.is_zero() && (parsed < *constants::MIN || parsed > *constants::MAX) {
            return Err(AmountError::OutOfRange);
        }

        Ok(MoneyAmount(parsed))
    }

    /// Returns the number of decimal places in the original input.
    pub fn scale(&self) -> u32 {
        self.0.scale()
    }

    /// Returns the value as an unsigned integer, without the decimal point.
    ///
    /// For example, `"12.34"` returns `1234`.
    pub fn mantissa(&self) -> u128 {
        self.0.mantissa().unsigned_abs()
    }

    /// Scales this amount to integer settlement units for a currency with
    /// `decimals` fractional digits, truncating excess precision toward zero.
    ///
    /// `"0.01"` becomes `"10000"` for a 6-decimal currency.
    pub fn to_settlement_units(&self, decimals: u32) -> String {
        let mantissa = U256::from(self.mantissa());
        let scale = self.scale();
        let value = if scale <= decimals {
            let multiplier = U256::from(10).pow(U256::from(decimals - scale));
            mantissa * multiplier
        } else {
            let divisor = U256::from(10).pow(U256::from(scale - decimals));
            mantissa / divisor
        };
        value.to_string()
    }

    /// Like [`to_settlement_units`](MoneyAmount::to_settlement_units), but
    /// fails with [`AmountError::PrecisionOverflow`] instead of truncating
    /// when the input carries more fractional digits than the currency
    /// supports. Used on audit-critical paths.
    pub fn to_settlement_units_strict(&self, decimals: u32) -> Result<String, AmountError> {
        let scale = self.scale();
        if scale > decimals && !trailing_digits_are_zero(&self.0, decimals) {
            return Err(AmountError::PrecisionOverflow { scale, decimals });
        }
        Ok(self.to_settlement_units(decimals))
    }
}

// "1.50" at 1 decimal is exact even though its scale is 2.
fn trailing_digits_are_zero(value: &Decimal, decimals: u32) -> bool {
    let mut truncated = *value;
    truncated.rescale(decimals);
    truncated == *value
}

impl FromStr for MoneyAmount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoneyAmount::parse(s)
    }
}

impl TryFrom<&str> for MoneyAmount {
    type Error = AmountError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        MoneyAmount::from_str(value)
    }
}

impl Display for MoneyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

/// Parses `amount` and scales it to integer settlement units, truncating
/// excess fractional digits toward zero.
pub fn to_settlement_units(amount: &str, decimals: u32) -> Result<String, AmountError> {
    Ok(MoneyAmount::parse(amount)?.to_settlement_units(decimals))
}

/// Parses `amount` and scales it to integer settlement units, failing with
/// [`AmountError::PrecisionOverflow`] if any precision would be lost.
pub fn to_settlement_units_strict(amount: &str, decimals: u32) -> Result<String, AmountError> {
    MoneyAmount::parse(amount)?.to_settlement_units_strict(decimals)
}

/// Converts an integer settlement-unit string back to a decimal display
/// string, preserving up to `decimals` fractional digits and trimming
/// trailing zeros for display.
///
/// Exact inverse of [`to_settlement_units`] up to `decimals` fractional
/// digits.
pub fn to_display_units(settlement_units: &str, decimals: u32) -> Result<String, AmountError> {
    if settlement_units.is_empty() || !settlement_units.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::InvalidFormat);
    }

    let digits = settlement_units.trim_start_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };

    if decimals == 0 {
        return Ok(digits.to_string());
    }

    let padded = if (digits.len() as u32) <= decimals {
        format!("{:0>width$}", digits, width = (decimals + 1) as usize)
    } else {
        digits.to_string()
    };

    let split = padded.len() - decimals as usize;
    let (integer, fraction) = padded.split_at(split);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        Ok(integer.to_string())
    } else {
        Ok(format!("{integer}.{fraction}"))
    }
}
