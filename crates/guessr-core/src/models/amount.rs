use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const CENTS_PER_UNIT: i64 = 100;

/// Sum of a user's donations, held in minor units (cents).
///
/// A total is never negative: refund rows that push a ledger sum below zero
/// clamp to `0.00`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct DonationTotal {
    cents: i64,
}

impl DonationTotal {
    pub const ZERO: Self = Self { cents: 0 };

    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        if cents < 0 {
            Self::ZERO
        } else {
            Self { cents }
        }
    }

    #[must_use]
    pub const fn from_units(units: i64) -> Self {
        Self::from_cents(units.saturating_mul(CENTS_PER_UNIT))
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.cents
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.cents == 0
    }

    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self::from_cents(self.cents.saturating_sub(other.cents))
    }
}

impl fmt::Display for DonationTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.cents / CENTS_PER_UNIT,
            self.cents % CENTS_PER_UNIT
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountParseError {
    #[error("amount is empty")]
    Empty,
    #[error("invalid amount: {0}")]
    Invalid(String),
    #[error("amount has more than two decimal places: {0}")]
    TooPrecise(String),
    #[error("amount is too large: {0}")]
    Overflow(String),
}

impl FromStr for DonationTotal {
    type Err = AmountParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AmountParseError::Empty);
        }
        let (whole, frac) = match trimmed.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (trimmed, ""),
        };
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(frac) {
            return Err(AmountParseError::Invalid(trimmed.to_string()));
        }
        if trimmed.ends_with('.') {
            return Err(AmountParseError::Invalid(trimmed.to_string()));
        }
        if frac.len() > 2 {
            return Err(AmountParseError::TooPrecise(trimmed.to_string()));
        }

        let overflow = || AmountParseError::Overflow(trimmed.to_string());
        let units: i64 = whole.parse().map_err(|_| overflow())?;
        let frac_cents: i64 = match frac.len() {
            0 => 0,
            1 => i64::from(frac.as_bytes()[0] - b'0') * 10,
            _ => frac.parse().map_err(|_| overflow())?,
        };
        let cents = units
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|value| value.checked_add(frac_cents))
            .ok_or_else(overflow)?;
        Ok(Self::from_cents(cents))
    }
}

impl TryFrom<String> for DonationTotal {
    type Error = AmountParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DonationTotal> for String {
    fn from(value: DonationTotal) -> Self {
        value.to_string()
    }
}
