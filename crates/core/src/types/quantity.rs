//! Line item quantity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A positive line item quantity.
///
/// A quantity is never below one. Every constructor clamps instead of
/// failing, so form input and stored blobs can always be coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// The smallest allowed quantity.
    pub const ONE: Self = Self(1);

    /// Create a quantity, clamping zero up to one.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        if value == 0 { Self::ONE } else { Self(value) }
    }

    /// Coerce raw form input into a quantity.
    ///
    /// Reads an optional sign and the leading run of digits after any leading
    /// whitespace (`"3 pcs"` is 3, `"2.9"` is 2). Input without a leading
    /// number, zero, and negative values all become one.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        let trimmed = raw.trim_start();
        let (negative, rest) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, trimmed.get(1..).unwrap_or_default()),
            Some(b'+') => (false, trimmed.get(1..).unwrap_or_default()),
            _ => (false, trimmed),
        };
        let digits: &str = rest
            .find(|c: char| !c.is_ascii_digit())
            .map_or(rest, |end| rest.get(..end).unwrap_or_default());

        if negative || digits.is_empty() {
            return Self::ONE;
        }
        // Overlong digit runs saturate rather than falling back to one.
        let value = digits.parse::<u32>().unwrap_or(u32::MAX);
        Self::new(value)
    }

    /// The quantity as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// One more, saturating at `u32::MAX`.
    #[must_use]
    pub const fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl From<i64> for Quantity {
    fn from(value: i64) -> Self {
        u32::try_from(value.max(1)).map_or(Self(u32::MAX), Self)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
