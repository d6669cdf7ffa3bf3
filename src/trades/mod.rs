//! Bonding-curve trade history: classification of raw trade rows, the USD
//! price series drawn on the chart, and its statistics.

pub mod dedup;
pub mod series;
pub mod stats;
pub mod types;

pub use dedup::{dedupe, dedupe_by, BucketGranularity, DedupStrategy};
pub use series::{build, build_from_events, graduation_threshold_usd, ChartPoint};
pub use stats::{price_stats, PriceStats};
pub use types::{classify, CounterpartyRole, RawTradeRecord, TradeDirection, TradeEvent, TradeRejection};
