use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

use super::series::ChartPoint;
use crate::constants::{MS_PER_DAY, MS_PER_HOUR};

/// How several points in one bucket collapse into one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupStrategy {
    #[default]
    Latest,
    Earliest,
    Average,
    Sum,
    Max,
    Min,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketGranularity {
    Hour,
    #[default]
    Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} {value:?}")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
}

impl FromStr for DedupStrategy {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest" => Ok(DedupStrategy::Latest),
            "earliest" => Ok(DedupStrategy::Earliest),
            "average" => Ok(DedupStrategy::Average),
            "sum" => Ok(DedupStrategy::Sum),
            "max" => Ok(DedupStrategy::Max),
            "min" => Ok(DedupStrategy::Min),
            _ => Err(ParseOptionError { kind: "dedup strategy", value: s.to_string() }),
        }
    }
}

impl fmt::Display for DedupStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DedupStrategy::Latest => "latest",
            DedupStrategy::Earliest => "earliest",
            DedupStrategy::Average => "average",
            DedupStrategy::Sum => "sum",
            DedupStrategy::Max => "max",
            DedupStrategy::Min => "min",
        };
        f.write_str(name)
    }
}

impl FromStr for BucketGranularity {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hour" => Ok(BucketGranularity::Hour),
            "day" => Ok(BucketGranularity::Day),
            _ => Err(ParseOptionError { kind: "bucket granularity", value: s.to_string() }),
        }
    }
}

impl BucketGranularity {
    fn width_ms(&self) -> i64 {
        match self {
            BucketGranularity::Hour => MS_PER_HOUR,
            BucketGranularity::Day => MS_PER_DAY,
        }
    }

    /// Start of the UTC bucket containing `timestamp_ms`
    pub fn bucket_start(&self, timestamp_ms: i64) -> i64 {
        let width = self.width_ms();
        timestamp_ms.div_euclid(width) * width
    }
}

/// Collapse points sharing a UTC day.
pub fn dedupe(points: &[ChartPoint], strategy: DedupStrategy) -> Vec<ChartPoint> {
    dedupe_by(points, strategy, BucketGranularity::Day)
}

/// Collapse points sharing a bucket. Buckets come out in the order they were
/// first seen and each output point sits at its bucket start. "Latest" and
/// "earliest" refer to position in `points`, which callers pass in time order.
pub fn dedupe_by(
    points: &[ChartPoint],
    strategy: DedupStrategy,
    granularity: BucketGranularity,
) -> Vec<ChartPoint> {
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut buckets: Vec<(i64, Vec<f64>)> = Vec::new();

    for point in points {
        let key = granularity.bucket_start(point.timestamp_ms);
        let slot = *index.entry(key).or_insert_with(|| {
            buckets.push((key, Vec::new()));
            buckets.len() - 1
        });
        buckets[slot].1.push(point.price_usd);
    }

    buckets
        .into_iter()
        .filter_map(|(key, prices)| collapse(&prices, strategy).map(|price| ChartPoint::new(key, price)))
        .collect()
}

fn collapse(prices: &[f64], strategy: DedupStrategy) -> Option<f64> {
    let first = *prices.first()?;
    let value = match strategy {
        DedupStrategy::Latest => *prices.last()?,
        DedupStrategy::Earliest => first,
        DedupStrategy::Sum => prices.iter().sum(),
        DedupStrategy::Average => prices.iter().sum::<f64>() / prices.len() as f64,
        DedupStrategy::Max => prices.iter().copied().fold(first, f64::max),
        DedupStrategy::Min => prices.iter().copied().fold(first, f64::min),
    };
    Some(value)
}
