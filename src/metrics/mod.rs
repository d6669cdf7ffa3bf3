use ::metrics::{counter, increment_counter};

// Counters for records dropped from a page and points produced. Without an
// installed recorder these are no-ops.
pub const METRIC_TRADES_SKIPPED: &str = "fundraise_trades_skipped_total";
pub const METRIC_CONTRIBUTIONS_SKIPPED: &str = "fundraise_contributions_skipped_total";
pub const METRIC_CHART_POINTS: &str = "fundraise_chart_points_total";

pub fn record_trade_skipped(reason: &'static str) {
    increment_counter!(METRIC_TRADES_SKIPPED, "reason" => reason);
}

pub fn record_contribution_skipped(reason: &'static str) {
    increment_counter!(METRIC_CONTRIBUTIONS_SKIPPED, "reason" => reason);
}

pub fn record_chart_points(count: usize) {
    counter!(METRIC_CHART_POINTS, count as u64);
}
