//! Wei-equivalent token amounts.
//!
//! Indexers hand us amounts as decimal strings of the raw on-chain integer
//! (already scaled by 10^18). `FixedAmount` keeps that integer intact in a
//! `U256` so comparisons and fee math never touch a binary float. Turning it
//! into something a human reads is one-way and happens at the edges.

use ethers_core::types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

use crate::constants::TOKEN_DECIMALS;

/// Largest mantissa a `Decimal` can hold (2^96 - 1)
const DECIMAL_MAX_MANTISSA: u128 = (1u128 << 96) - 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount {0:?} is negative")]
    Negative(String),
    #[error("amount {0:?} is not a decimal number")]
    Invalid(String),
    #[error("amount {0:?} has more than 18 fractional digits")]
    Precision(String),
    #[error("amount overflows the target representation")]
    Overflow,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedAmount(U256);

impl FixedAmount {
    pub const DECIMALS: u32 = TOKEN_DECIMALS;

    pub fn zero() -> Self {
        Self(U256::zero())
    }

    pub fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// Whole tokens, e.g. `from_tokens(3)` is `3 * 10^18` wei
    pub fn from_tokens(tokens: u64) -> Self {
        Self(U256::from(tokens).saturating_mul(scale()))
    }

    pub fn raw(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parse the indexer encoding: a base-10 string of the already scaled integer.
    pub fn from_dec_str(input: &str) -> Result<Self, AmountError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(AmountError::Empty);
        }
        if s.starts_with('-') {
            return Err(AmountError::Negative(s.to_string()));
        }
        let digits = s.strip_prefix('+').unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::Invalid(s.to_string()));
        }
        U256::from_dec_str(digits)
            .map(Self)
            .map_err(|_| AmountError::Overflow)
    }

    /// Parse a human decimal such as `"1.5"` into its scaled integer.
    pub fn parse_units(input: &str) -> Result<Self, AmountError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(AmountError::Empty);
        }
        if s.starts_with('-') {
            return Err(AmountError::Negative(s.to_string()));
        }
        let unsigned = s.strip_prefix('+').unwrap_or(s);
        let (whole, frac) = match unsigned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (unsigned, ""),
        };
        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !is_digits(whole) || !is_digits(frac) {
            return Err(AmountError::Invalid(s.to_string()));
        }
        if frac.len() > Self::DECIMALS as usize {
            return Err(AmountError::Precision(s.to_string()));
        }

        let padded = format!(
            "{}{:0<width$}",
            if whole.is_empty() { "0" } else { whole },
            frac,
            width = Self::DECIMALS as usize
        );
        U256::from_dec_str(&padded)
            .map(Self)
            .map_err(|_| AmountError::Overflow)
    }

    pub fn from_decimal(value: Decimal) -> Result<Self, AmountError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::Negative(value.to_string()));
        }
        Self::parse_units(&value.normalize().to_string())
    }

    fn split(&self) -> (U256, U256) {
        self.0.div_mod(scale())
    }

    /// Exact decimal rendering, trailing fractional zeros trimmed.
    pub fn format_units(&self) -> String {
        let (whole, frac) = self.split();
        if frac.is_zero() {
            return whole.to_string();
        }
        let frac = format!("{:0>width$}", frac.to_string(), width = Self::DECIMALS as usize);
        format!("{}.{}", whole, frac.trim_end_matches('0'))
    }

    /// Render with exactly `places` fractional digits, truncating the rest.
    pub fn format_fixed(&self, places: u32) -> String {
        let (whole, frac) = self.split();
        let places = places.min(Self::DECIMALS) as usize;
        if places == 0 {
            return whole.to_string();
        }
        let frac = format!("{:0>width$}", frac.to_string(), width = Self::DECIMALS as usize);
        format!("{}.{}", whole, &frac[..places])
    }

    /// Divide by 10^18 in integer space and build a `Decimal` from the parts.
    pub fn to_decimal(&self) -> Result<Decimal, AmountError> {
        if self.0 <= U256::from(DECIMAL_MAX_MANTISSA) {
            return Decimal::try_from_i128_with_scale(self.0.as_u128() as i128, Self::DECIMALS)
                .map_err(|_| AmountError::Overflow);
        }

        // Too many significant digits for a full-scale mantissa: keep the whole
        // part exact and let the fractional part round into what is left.
        let (whole, frac) = self.split();
        if whole > U256::from(DECIMAL_MAX_MANTISSA) {
            return Err(AmountError::Overflow);
        }
        let whole = Decimal::try_from_i128_with_scale(whole.as_u128() as i128, 0)
            .map_err(|_| AmountError::Overflow)?;
        let frac = Decimal::try_from_i128_with_scale(frac.as_u128() as i128, Self::DECIMALS)
            .map_err(|_| AmountError::Overflow)?;
        whole.checked_add(frac).ok_or(AmountError::Overflow)
    }

    /// Lossy float view, only for chart coordinates.
    pub fn to_f64(&self) -> f64 {
        self.format_units().parse().unwrap_or(f64::MAX)
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// `self * numerator / denominator`, floored. Falls back to dividing first
    /// when the product does not fit in 256 bits.
    pub fn mul_div(self, numerator: u64, denominator: u64) -> Self {
        if denominator == 0 {
            return Self::zero();
        }
        let num = U256::from(numerator);
        let den = U256::from(denominator);
        match self.0.checked_mul(num) {
            Some(product) => Self(product / den),
            None => Self((self.0 / den).saturating_mul(num)),
        }
    }

    /// `self / other` as a float. Both sides are rendered exactly and rounded
    /// to `f64` once, so tiny ratios keep their significant digits.
    pub fn ratio(self, other: Self) -> Option<f64> {
        if other.is_zero() {
            return None;
        }
        Some(self.to_f64() / other.to_f64())
    }
}

fn scale() -> U256 {
    U256::exp10(TOKEN_DECIMALS as usize)
}

impl fmt::Display for FixedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FixedAmount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_dec_str(s)
    }
}

impl From<U256> for FixedAmount {
    fn from(raw: U256) -> Self {
        Self(raw)
    }
}

impl std::iter::Sum for FixedAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Self::saturating_add)
    }
}

impl Serialize for FixedAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for FixedAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_dec_str(&s).map_err(serde::de::Error::custom)
    }
}
