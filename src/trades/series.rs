use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::types::{RawTradeRecord, TradeEvent};
use crate::amount::FixedAmount;
use crate::constants::GRADUATION_MARKET_CAP_AWE;
use crate::metrics::{record_chart_points, record_trade_skipped};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub timestamp_ms: i64,
    pub price_usd: f64,
}

impl ChartPoint {
    pub fn new(timestamp_ms: i64, price_usd: f64) -> Self {
        Self { timestamp_ms, price_usd }
    }
}

/// Turn a page of raw trades into a USD price series sorted by time.
/// Records that fail classification or carry a zero amount are skipped.
pub fn build(page: &[RawTradeRecord], awe_price_usd: f64) -> Vec<ChartPoint> {
    let events: Vec<TradeEvent> = page
        .iter()
        .filter_map(|raw| match TradeEvent::try_from(raw) {
            Ok(event) => Some(event),
            Err(e) => {
                debug!("Skipping trade {}: {}", raw.id, e);
                record_trade_skipped(e.reason());
                None
            }
        })
        .collect();

    let series = build_from_events(&events, awe_price_usd);
    debug!(
        "Built {} chart points from {} trades ({} skipped)",
        series.len(),
        page.len(),
        page.len() - events.len()
    );
    series
}

pub fn build_from_events(events: &[TradeEvent], awe_price_usd: f64) -> Vec<ChartPoint> {
    if !awe_price_usd.is_finite() || awe_price_usd < 0.0 {
        warn!("Rejecting AWE reference price {}", awe_price_usd);
        return Vec::new();
    }

    let mut series: Vec<ChartPoint> = events
        .iter()
        .filter_map(|event| {
            let Some(timestamp_ms) = event.timestamp_ms() else {
                debug!("Skipping trade {}: bad block timestamp {}", event.id, event.block_timestamp);
                record_trade_skipped("invalid_timestamp");
                return None;
            };
            let ratio = event.quote_amount.ratio(event.base_amount)?;
            Some(ChartPoint::new(timestamp_ms, ratio * awe_price_usd))
        })
        .collect();

    // stable, so equal timestamps keep page order
    series.sort_by_key(|p| p.timestamp_ms);
    record_chart_points(series.len());
    series
}

/// USD token price at which the curve reaches the graduation market cap.
pub fn graduation_threshold_usd(total_supply: FixedAmount, awe_price_usd: f64) -> f64 {
    if total_supply.is_zero() {
        return 0.0;
    }
    (GRADUATION_MARKET_CAP_AWE as f64 / total_supply.to_f64()) * awe_price_usd
}
