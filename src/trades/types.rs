use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::amount::{AmountError, FixedAmount};
use crate::constants::MS_PER_SECOND;

/// A bonding-curve trade row as the indexer returns it. Amounts are scaled
/// decimal strings; older rows carry no `tradeType` and are told apart by
/// which of `buyer`/`seller` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTradeRecord {
    pub id: String,
    #[serde(default)]
    pub trade_type: Option<String>,
    #[serde(default)]
    pub buyer: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub trader: Option<String>,
    pub base_amount: String,
    pub quote_amount: String,
    pub block_timestamp: String,
    #[serde(default)]
    pub tx_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TradeDirection {
    Buy { trader: String },
    Sell { trader: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CounterpartyRole {
    Buyer,
    Seller,
}

impl TradeDirection {
    pub fn trader(&self) -> &str {
        match self {
            TradeDirection::Buy { trader } | TradeDirection::Sell { trader } => trader,
        }
    }

    pub fn role(&self) -> CounterpartyRole {
        match self {
            TradeDirection::Buy { .. } => CounterpartyRole::Buyer,
            TradeDirection::Sell { .. } => CounterpartyRole::Seller,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeEvent {
    pub id: String,
    pub direction: TradeDirection,
    /// Launched token
    pub base_amount: FixedAmount,
    /// AWE
    pub quote_amount: FixedAmount,
    pub block_timestamp: u64,
    pub tx_hash: String,
}

impl TradeEvent {
    pub fn role(&self) -> CounterpartyRole {
        self.direction.role()
    }

    pub fn trader_address(&self) -> &str {
        self.direction.trader()
    }

    /// Block time in milliseconds, `None` when it does not fit an `i64`.
    pub fn timestamp_ms(&self) -> Option<i64> {
        i64::try_from(self.block_timestamp).ok()?.checked_mul(MS_PER_SECOND)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TradeRejection {
    #[error("unrecognized trade type {0:?}")]
    UnknownDirection(String),
    #[error("trade has neither a type tag nor a buyer/seller field")]
    MissingDirection,
    #[error("bad {field}: {source}")]
    InvalidAmount {
        field: &'static str,
        #[source]
        source: AmountError,
    },
    #[error("{0} must be greater than zero")]
    NonPositiveAmount(&'static str),
    #[error("bad block timestamp {0:?}")]
    InvalidTimestamp(String),
}

impl TradeRejection {
    /// Short label for metrics
    pub fn reason(&self) -> &'static str {
        match self {
            TradeRejection::UnknownDirection(_) => "unknown_direction",
            TradeRejection::MissingDirection => "missing_direction",
            TradeRejection::InvalidAmount { .. } => "invalid_amount",
            TradeRejection::NonPositiveAmount(_) => "non_positive_amount",
            TradeRejection::InvalidTimestamp(_) => "invalid_timestamp",
        }
    }
}

/// Tag first, then shape. A tag that is present but is neither buy nor sell
/// rejects the record even if a role field is set.
pub fn classify(raw: &RawTradeRecord) -> Result<TradeDirection, TradeRejection> {
    let present = |field: &Option<String>| {
        field
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    let buyer = present(&raw.buyer);
    let seller = present(&raw.seller);
    let fallback = present(&raw.trader);

    let tag = raw.trade_type.as_deref().map(str::trim).filter(|s| !s.is_empty());
    match tag {
        Some(tag) if tag.eq_ignore_ascii_case("buy") => Ok(TradeDirection::Buy {
            trader: buyer.or(seller).or(fallback).unwrap_or_default(),
        }),
        Some(tag) if tag.eq_ignore_ascii_case("sell") => Ok(TradeDirection::Sell {
            trader: seller.or(buyer).or(fallback).unwrap_or_default(),
        }),
        Some(tag) => Err(TradeRejection::UnknownDirection(tag.to_string())),
        None => match (buyer, seller) {
            (Some(trader), _) => Ok(TradeDirection::Buy { trader }),
            (None, Some(trader)) => Ok(TradeDirection::Sell { trader }),
            (None, None) => Err(TradeRejection::MissingDirection),
        },
    }
}

fn positive_amount(value: &str, field: &'static str) -> Result<FixedAmount, TradeRejection> {
    let amount = FixedAmount::from_dec_str(value)
        .map_err(|source| TradeRejection::InvalidAmount { field, source })?;
    if amount.is_zero() {
        return Err(TradeRejection::NonPositiveAmount(field));
    }
    Ok(amount)
}

impl TryFrom<&RawTradeRecord> for TradeEvent {
    type Error = TradeRejection;

    fn try_from(raw: &RawTradeRecord) -> Result<Self, Self::Error> {
        let direction = classify(raw)?;
        let base_amount = positive_amount(&raw.base_amount, "base amount")?;
        let quote_amount = positive_amount(&raw.quote_amount, "quote amount")?;
        let invalid_timestamp = || TradeRejection::InvalidTimestamp(raw.block_timestamp.clone());
        let block_timestamp = raw
            .block_timestamp
            .trim()
            .parse::<u64>()
            .map_err(|_| invalid_timestamp())?;

        let event = TradeEvent {
            id: raw.id.clone(),
            direction,
            base_amount,
            quote_amount,
            block_timestamp,
            tx_hash: raw.tx_hash.clone(),
        };
        if event.timestamp_ms().is_none() {
            return Err(invalid_timestamp());
        }
        Ok(event)
    }
}
