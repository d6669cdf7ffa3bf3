use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignState {
    Ongoing,
    Live,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FundraisingType {
    FixedPrice,
    BondingCurve,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} {value:?}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_uppercase().replace(['-', ' '], "_")
}

impl FromStr for CampaignState {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "ONGOING" => Ok(CampaignState::Ongoing),
            "LIVE" => Ok(CampaignState::Live),
            "COMPLETED" => Ok(CampaignState::Completed),
            "CANCELLED" | "CANCELED" => Ok(CampaignState::Cancelled),
            _ => Err(UnknownVariant { kind: "campaign state", value: s.to_string() }),
        }
    }
}

impl FromStr for FundraisingType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "FIXED_PRICE" => Ok(FundraisingType::FixedPrice),
            "BONDING_CURVE" => Ok(FundraisingType::BondingCurve),
            _ => Err(UnknownVariant { kind: "fundraising type", value: s.to_string() }),
        }
    }
}

/// A campaign has graduated once it is live. Every fundraising type graduates
/// the same way today.
pub fn is_graduated(fundraising_type: Option<FundraisingType>, status: Option<CampaignState>) -> bool {
    if status != Some(CampaignState::Live) {
        return false;
    }
    match fundraising_type {
        None => true,
        Some(FundraisingType::FixedPrice) | Some(FundraisingType::BondingCurve) => true,
    }
}
