//! Token unlock schedule for a campaign: a TGE tranche followed by equal
//! monthly tranches.

pub mod calendar;

use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::TGE_LABEL;
use calendar::add_months_clamped;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VestingConfig {
    pub target_amount: Decimal,
    pub unlock_at_tge_pct: f64,
    pub duration_months: i32,
    pub tge_date: NaiveDate,
    pub vesting_start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VestingScheduleItem {
    pub order: u32,
    pub label: String,
    pub date: NaiveDate,
    pub percentage: f64,
    pub unlock_amount: Decimal,
    pub cumulative_percentage: f64,
    pub cumulative_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum VestingError {
    #[error("TGE unlock percentage must be between 0 and 100, got {0}")]
    TgePercentageOutOfRange(f64),
    #[error("vesting duration must not be negative, got {0} months")]
    NegativeDuration(i32),
    #[error("target amount must be greater than 0, got {0}")]
    NonPositiveTarget(Decimal),
    #[error("vesting start {start} is before TGE {tge}")]
    StartBeforeTge { tge: NaiveDate, start: NaiveDate },
    #[error("unlock date for month {0} is out of calendar range")]
    DateOutOfRange(u32),
    #[error("unlock amounts overflow the decimal range")]
    AmountOverflow,
}

/// Every problem with `config`, in field order. Empty when the config is usable.
pub fn validate(config: &VestingConfig) -> Vec<VestingError> {
    let mut errors = Vec::new();

    let pct = config.unlock_at_tge_pct;
    if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
        errors.push(VestingError::TgePercentageOutOfRange(pct));
    }
    if config.duration_months < 0 {
        errors.push(VestingError::NegativeDuration(config.duration_months));
    }
    if config.target_amount <= Decimal::ZERO {
        errors.push(VestingError::NonPositiveTarget(config.target_amount));
    }
    if config.vesting_start_date < config.tge_date {
        errors.push(VestingError::StartBeforeTge {
            tge: config.tge_date,
            start: config.vesting_start_date,
        });
    }
    if config.duration_months > 0
        && add_months_clamped(config.vesting_start_date, config.duration_months as u32).is_none()
    {
        errors.push(VestingError::DateOutOfRange(config.duration_months as u32));
    }

    errors
}

pub fn generate_checked(config: &VestingConfig) -> Result<Vec<VestingScheduleItem>, Vec<VestingError>> {
    let errors = validate(config);
    if !errors.is_empty() {
        return Err(errors);
    }
    schedule(config).map_err(|e| vec![e])
}

/// Build the unlock table. Does not validate; a negative duration yields only
/// the TGE row and months whose date cannot be represented are dropped. Amounts
/// that overflow a `Decimal` yield an empty table.
pub fn generate(config: &VestingConfig) -> Vec<VestingScheduleItem> {
    schedule(config).unwrap_or_else(|e| {
        warn!("Cannot build vesting schedule: {}", e);
        Vec::new()
    })
}

fn schedule(config: &VestingConfig) -> Result<Vec<VestingScheduleItem>, VestingError> {
    let target = config.target_amount;
    let tge_pct = config.unlock_at_tge_pct;
    let months = config.duration_months.max(0) as u32;

    let tge_amount = percent_of(target, tge_pct).ok_or(VestingError::AmountOverflow)?;
    let mut schedule = Vec::with_capacity(months as usize + 1);
    schedule.push(VestingScheduleItem {
        order: 0,
        label: TGE_LABEL.to_string(),
        date: config.tge_date,
        percentage: tge_pct,
        unlock_amount: tge_amount,
        cumulative_percentage: tge_pct,
        cumulative_amount: tge_amount,
    });

    if months == 0 {
        return Ok(schedule);
    }

    let monthly_pct = (100.0 - tge_pct) / months as f64;
    let remaining = target.checked_sub(tge_amount).ok_or(VestingError::AmountOverflow)?;
    let monthly_amount = remaining
        .checked_div(Decimal::from(months))
        .ok_or(VestingError::AmountOverflow)?;
    let mut cumulative_amount = tge_amount;

    for m in 1..=months {
        let Some(date) = add_months_clamped(config.vesting_start_date, m) else {
            debug!("vesting month {} overflows the calendar, stopping", m);
            break;
        };

        // the final tranche takes whatever division left over
        let unlock_amount = if m == months {
            target.checked_sub(cumulative_amount)
        } else {
            Some(monthly_amount)
        }
        .ok_or(VestingError::AmountOverflow)?;
        cumulative_amount = cumulative_amount
            .checked_add(unlock_amount)
            .ok_or(VestingError::AmountOverflow)?;

        let cumulative_percentage = (tge_pct + monthly_pct * m as f64).min(100.0);

        schedule.push(VestingScheduleItem {
            order: m,
            label: format!("Month {}", m),
            date,
            percentage: monthly_pct,
            unlock_amount,
            cumulative_percentage,
            cumulative_amount,
        });
    }

    Ok(schedule)
}

/// `amount * pct / 100`, scaling the percentage down first so an in-range
/// percentage never grows the amount.
fn percent_of(amount: Decimal, pct: f64) -> Option<Decimal> {
    let pct = Decimal::from_f64(pct).unwrap_or(Decimal::ZERO);
    let fraction = pct.checked_div(Decimal::ONE_HUNDRED)?;
    amount.checked_mul(fraction)
}
