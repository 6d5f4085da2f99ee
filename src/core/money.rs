use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance for treating an accumulated balance as settled.
///
/// Matches two-decimal-place currency precision: anything within one cent
/// of zero is considered paid off. Both the balance checks and the
/// settlement matching loop compare through this single constant; no code
/// compares accumulated sums for exact equality.
pub const SETTLEMENT_EPSILON: Decimal = dec!(0.01);

/// Round an amount to cents using half-up rounding.
///
/// 0.005 rounds away from zero to 0.01 (and -0.005 to -0.01). This is the
/// documented rounding mode for all emitted settlement amounts.
///
/// # Examples
///
/// ```
/// use split_engine::core::money::round_to_cents;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_to_cents(dec!(26.666)), dec!(26.67));
/// assert_eq!(round_to_cents(dec!(0.005)), dec!(0.01));
/// ```
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Whether a balance is close enough to zero to count as settled.
pub fn is_settled(amount: Decimal) -> bool {
    amount.abs() < SETTLEMENT_EPSILON
}

/// ISO 4217-style currency tag carried by a group.
///
/// Descriptive only: every amount inside a group is assumed to be in the
/// group's currency, and the engine never converts between currencies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
