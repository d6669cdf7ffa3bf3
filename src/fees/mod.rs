use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amount::FixedAmount;
use crate::constants::{BPS_DENOMINATOR, PLATFORM_FEE_BPS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// Which side of the swap form the user typed into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuoteMode {
    ExactIn,
    ExactOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown<T> {
    pub base: T,
    pub fee: T,
    pub total: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuote<T> {
    pub side: TradeSide,
    pub mode: QuoteMode,
    pub breakdown: FeeBreakdown<T>,
}

/// An amount the platform fee can be charged on.
pub trait FeeBase: Copy {
    fn platform_fee(&self) -> Self;
    fn plus(&self, other: &Self) -> Self;
}

impl FeeBase for FixedAmount {
    /// Integer basis-point math, floored to the wei.
    fn platform_fee(&self) -> Self {
        self.mul_div(PLATFORM_FEE_BPS, BPS_DENOMINATOR)
    }

    fn plus(&self, other: &Self) -> Self {
        self.saturating_add(*other)
    }
}

impl FeeBase for Decimal {
    fn platform_fee(&self) -> Self {
        if *self <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        // exact: the rate has three decimal places
        *self * fee_rate()
    }

    fn plus(&self, other: &Self) -> Self {
        self.saturating_add(*other)
    }
}

/// 0.005
pub fn fee_rate() -> Decimal {
    Decimal::from(PLATFORM_FEE_BPS) / Decimal::from(BPS_DENOMINATOR)
}

pub fn fee<T: FeeBase>(base: T) -> T {
    base.platform_fee()
}

pub fn total_with_fee<T: FeeBase>(base: T) -> FeeBreakdown<T> {
    let fee = base.platform_fee();
    FeeBreakdown {
        base,
        fee,
        total: base.plus(&fee),
    }
}

/// Pick the fee base from the swap form: the user-entered amount for exact-in
/// quotes, the quoted amount for exact-out quotes. `side` does not change the
/// selection and is carried through for the caller.
pub fn fee_context<T: FeeBase>(
    input_amount: T,
    computed_amount: T,
    side: TradeSide,
    mode: QuoteMode,
) -> FeeQuote<T> {
    let base = match mode {
        QuoteMode::ExactIn => input_amount,
        QuoteMode::ExactOut => computed_amount,
    };
    FeeQuote {
        side,
        mode,
        breakdown: total_with_fee(base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers_core::types::U256;
    use rust_decimal::RoundingStrategy;
    use rust_decimal_macros::dec;

    #[test]
    fn test_integer_fee_is_exact() {
        let base = FixedAmount::from_tokens(1_000);
        assert_eq!(fee(base), FixedAmount::from_tokens(5));

        let odd = FixedAmount::from_raw(U256::from(199u64));
        // 199 * 50 / 10000 = 0.995, floored
        assert_eq!(fee(odd), FixedAmount::zero());

        let raw = U256::from(123_456_789_012_345_678u64);
        let expected = raw * U256::from(50u64) / U256::from(10_000u64);
        assert_eq!(fee(FixedAmount::from_raw(raw)).raw(), expected);
    }

    #[test]
    fn test_zero_and_negative_bases() {
        assert_eq!(fee(FixedAmount::zero()), FixedAmount::zero());
        assert_eq!(fee(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(fee(dec!(-10)), Decimal::ZERO);

        let breakdown = total_with_fee(dec!(-10));
        assert_eq!(breakdown.fee, Decimal::ZERO);
        assert_eq!(breakdown.total, dec!(-10));
    }

    #[test]
    fn test_fee_is_smaller_than_base() {
        for raw in [1u128, 200, 10_000, 1_000_000_000_000_000_000] {
            let base = FixedAmount::from_raw(U256::from(raw));
            assert!(fee(base) < base);
        }
        assert!(fee(dec!(0.0001)) < dec!(0.0001));
    }

    #[test]
    fn test_domains_agree_to_the_wei() {
        for human in ["1", "0.3", "123.456789", "99999.999999999999999999", "0.000000000000000333"] {
            let decimal: Decimal = human.parse().unwrap();
            let integer = FixedAmount::parse_units(human).unwrap();

            let decimal_fee = fee(decimal).round_dp_with_strategy(18, RoundingStrategy::ToZero);
            assert_eq!(decimal_fee, fee(integer).to_decimal().unwrap(), "base {human}");
        }
    }

    #[test]
    fn test_total_with_fee() {
        let breakdown = total_with_fee(dec!(100));
        assert_eq!(breakdown.base, dec!(100));
        assert_eq!(breakdown.fee, dec!(0.5));
        assert_eq!(breakdown.total, dec!(100.5));

        let breakdown = total_with_fee(FixedAmount::from_tokens(200));
        assert_eq!(breakdown.total, FixedAmount::from_tokens(201));
    }

    #[test]
    fn test_fee_context_selects_base_by_mode() {
        let exact_in = fee_context(dec!(100), dec!(40), TradeSide::Buy, QuoteMode::ExactIn);
        assert_eq!(exact_in.breakdown.base, dec!(100));
        assert_eq!(exact_in.breakdown.fee, dec!(0.5));

        let exact_out = fee_context(dec!(100), dec!(40), TradeSide::Buy, QuoteMode::ExactOut);
        assert_eq!(exact_out.breakdown.base, dec!(40));
        assert_eq!(exact_out.breakdown.fee, dec!(0.2));

        let sell = fee_context(dec!(100), dec!(40), TradeSide::Sell, QuoteMode::ExactOut);
        assert_eq!(sell.side, TradeSide::Sell);
        assert_eq!(sell.breakdown, exact_out.breakdown);
    }
}
