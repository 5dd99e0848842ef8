//! Display prices and the lenient parser behind them.
//!
//! Line items store their price as the formatted display string (`"$50.00"`)
//! and re-parse it whenever a total is computed. Parsing must therefore
//! tolerate whatever surrounds the number on a product card: currency
//! symbols, whitespace, thousands separators.
//!
//! ```
//! use stylemart_core::Price;
//!
//! assert_eq!(Price::parse(" $1,299.5 ").to_string(), "$1299.50");
//! assert_eq!(Price::parse("free").to_string(), "$0.00");
//! ```

use core::fmt;
use core::iter::Sum;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::Quantity;

/// A price in the store's single currency (dollars).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from an amount in dollars.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Parse a price out of arbitrary display text.
    ///
    /// Every character that is not an ASCII digit, `.` or `-` is discarded
    /// first. What remains must be an optionally negative decimal with at most
    /// one dot; anything else (including an empty string) yields zero.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let kept: String = text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();
        Self(parse_stripped(&kept).unwrap_or(Decimal::ZERO))
    }

    /// The underlying amount in dollars.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        Self(self.0 * Decimal::from(quantity.get()))
    }
}

/// Convert the digits/dot/minus residue into a decimal.
fn parse_stripped(s: &str) -> Option<Decimal> {
    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    if unsigned.contains('-') {
        return None;
    }
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if fraction.contains('.') {
        return None;
    }
    if whole.is_empty() && fraction.is_empty() {
        // "" is zero, but a bare "-" or "." is not a number.
        return if s.is_empty() { Some(Decimal::ZERO) } else { None };
    }

    let normalized = format!(
        "{sign}{whole}.{fraction}",
        sign = if negative { "-" } else { "" },
        whole = if whole.is_empty() { "0" } else { whole },
        fraction = if fraction.is_empty() { "0" } else { fraction },
    );
    let amount = Decimal::from_str(&normalized).ok()?;
    Some(if amount.is_zero() { Decimal::ZERO } else { amount })
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let rounded = if rounded.is_zero() {
            Decimal::ZERO
        } else {
            rounded
        };
        write!(f, "${rounded:.2}")
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|price| price.0).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap_or_default()
    }

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(Price::parse("50").amount(), dec("50"));
        assert_eq!(Price::parse("50.00").amount(), dec("50"));
        assert_eq!(Price::parse("19.99").amount(), dec("19.99"));
    }

    #[test]
    fn test_parse_strips_currency_and_separators() {
        assert_eq!(Price::parse("$50").amount(), dec("50"));
        assert_eq!(Price::parse("  USD $ 1,299.00  ").amount(), dec("1299"));
        assert_eq!(Price::parse("Price: $12.50 each").amount(), dec("12.5"));
    }

    #[test]
    fn test_parse_negative_and_partial_decimals() {
        assert_eq!(Price::parse("-$5").amount(), dec("-5"));
        assert_eq!(Price::parse(".5").amount(), dec("0.5"));
        assert_eq!(Price::parse("5.").amount(), dec("5"));
        assert_eq!(Price::parse("-.25").amount(), dec("-0.25"));
    }

    #[test]
    fn test_parse_malformed_yields_zero() {
        assert_eq!(Price::parse(""), Price::ZERO);
        assert_eq!(Price::parse("free"), Price::ZERO);
        assert_eq!(Price::parse("$"), Price::ZERO);
        assert_eq!(Price::parse("-"), Price::ZERO);
        assert_eq!(Price::parse("."), Price::ZERO);
        assert_eq!(Price::parse("1.2.3"), Price::ZERO);
        assert_eq!(Price::parse("5-3"), Price::ZERO);
        assert_eq!(Price::parse("--5"), Price::ZERO);
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::parse("50").to_string(), "$50.00");
        assert_eq!(Price::parse("0.5").to_string(), "$0.50");
        assert_eq!(Price::parse("2.005").to_string(), "$2.01");
        assert_eq!(Price::parse("-5").to_string(), "$-5.00");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_negative_zero_formats_as_zero() {
        assert_eq!(Price::parse("-0").to_string(), "$0.00");
        assert_eq!(Price::parse("-0.001").to_string(), "$0.00");
    }

    #[test]
    fn test_reformatting_is_idempotent() {
        for input in ["$50", "12.345", "  $7 ", "1,000.1"] {
            let once = Price::parse(input).to_string();
            let twice = Price::parse(&once).to_string();
            assert_eq!(once, twice, "input {input:?}");
        }
    }

    #[test]
    fn test_times_and_sum() {
        let unit = Price::parse("$19.99");
        let line = unit.times(Quantity::new(3));
        assert_eq!(line.to_string(), "$59.97");

        let total: Price = [line, Price::parse("$0.03")].into_iter().sum();
        assert_eq!(total.to_string(), "$60.00");
    }
}
