use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::amount::{AmountError, FixedAmount};

/// A fundraising activity row as the indexer returns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContributionRecord {
    pub id: String,
    #[serde(alias = "user")]
    pub contributor: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub timestamp: String,
    #[serde(default)]
    pub tx_hash: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContributionKind {
    Contribution,
    Refund,
    BondingCurveBuy,
    BondingCurveSell,
    DaoClaimed,
}

impl FromStr for ContributionKind {
    type Err = ContributionRejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "CONTRIBUTION" => Ok(ContributionKind::Contribution),
            "REFUND" => Ok(ContributionKind::Refund),
            "BONDING_CURVE_BUY" => Ok(ContributionKind::BondingCurveBuy),
            "BONDING_CURVE_SELL" => Ok(ContributionKind::BondingCurveSell),
            "DAO_CLAIMED" => Ok(ContributionKind::DaoClaimed),
            _ => Err(ContributionRejection::UnknownKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionEvent {
    pub id: String,
    pub contributor: String,
    pub kind: ContributionKind,
    pub amount: FixedAmount,
    pub timestamp: u64,
    pub tx_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContributionRejection {
    #[error("unknown contribution type {0:?}")]
    UnknownKind(String),
    #[error("bad amount: {0}")]
    InvalidAmount(#[from] AmountError),
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("bad timestamp {0:?}")]
    InvalidTimestamp(String),
    #[error("missing contributor address")]
    MissingContributor,
}

impl ContributionRejection {
    pub fn reason(&self) -> &'static str {
        match self {
            ContributionRejection::UnknownKind(_) => "unknown_kind",
            ContributionRejection::InvalidAmount(_) => "invalid_amount",
            ContributionRejection::NonPositiveAmount => "non_positive_amount",
            ContributionRejection::InvalidTimestamp(_) => "invalid_timestamp",
            ContributionRejection::MissingContributor => "missing_contributor",
        }
    }
}

impl TryFrom<&RawContributionRecord> for ContributionEvent {
    type Error = ContributionRejection;

    fn try_from(raw: &RawContributionRecord) -> Result<Self, Self::Error> {
        let contributor = raw.contributor.trim();
        if contributor.is_empty() {
            return Err(ContributionRejection::MissingContributor);
        }
        let kind = raw.kind.parse()?;
        let amount = FixedAmount::from_dec_str(&raw.amount)?;
        if amount.is_zero() {
            return Err(ContributionRejection::NonPositiveAmount);
        }
        let timestamp = raw
            .timestamp
            .trim()
            .parse::<u64>()
            .map_err(|_| ContributionRejection::InvalidTimestamp(raw.timestamp.clone()))?;

        Ok(ContributionEvent {
            id: raw.id.clone(),
            contributor: contributor.to_string(),
            kind,
            amount,
            timestamp,
            tx_hash: raw.tx_hash.clone(),
        })
    }
}

/// One ledger row per contribution event; a wallet that contributed twice
/// shows up twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub wallet_address: String,
    pub amount: Decimal,
    pub percentage_of_total: f64,
    pub timestamp: u64,
    pub tx_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub participants: Vec<Participant>,
    pub total_amount: Decimal,
    pub total_participants: usize,
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionStats {
    pub total_contributions: usize,
    pub total_refunds: usize,
    pub unique_contributors: usize,
    pub total_raised: Decimal,
    pub average_contribution: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTotal {
    pub wallet_address: String,
    pub amount: Decimal,
    pub contributions: usize,
}
