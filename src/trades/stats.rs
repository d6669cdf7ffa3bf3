use serde::{Deserialize, Serialize};

use super::series::ChartPoint;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceStats {
    pub current: f64,
    pub previous: f64,
    pub high: f64,
    pub low: f64,
    pub change: f64,
    pub change_pct: f64,
}

/// Header figures for a price chart. Expects the series in time order; an
/// empty series gives all zeros.
pub fn price_stats(series: &[ChartPoint]) -> PriceStats {
    let Some(last) = series.last() else {
        return PriceStats::default();
    };

    let current = last.price_usd;
    let previous = match series.len() {
        1 => current,
        n => series[n - 2].price_usd,
    };
    let (high, low) = series.iter().fold((f64::MIN, f64::MAX), |(hi, lo), p| {
        (hi.max(p.price_usd), lo.min(p.price_usd))
    });

    let change = current - previous;
    let change_pct = if previous == 0.0 { 0.0 } else { change / previous * 100.0 };

    PriceStats {
        current,
        previous,
        high,
        low,
        change,
        change_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(prices: &[f64]) -> Vec<ChartPoint> {
        prices
            .iter()
            .enumerate()
            .map(|(i, p)| ChartPoint::new(i as i64 * 1000, *p))
            .collect()
    }

    #[test]
    fn test_stats() {
        let stats = price_stats(&series(&[1.0, 4.0, 2.0, 2.5]));
        assert_eq!(stats.current, 2.5);
        assert_eq!(stats.previous, 2.0);
        assert_eq!(stats.high, 4.0);
        assert_eq!(stats.low, 1.0);
        assert_eq!(stats.change, 0.5);
        assert_eq!(stats.change_pct, 25.0);
    }

    #[test]
    fn test_single_point_has_no_change() {
        let stats = price_stats(&series(&[3.0]));
        assert_eq!(stats.previous, 3.0);
        assert_eq!(stats.change, 0.0);
        assert_eq!(stats.change_pct, 0.0);
        assert_eq!((stats.high, stats.low), (3.0, 3.0));
    }

    #[test]
    fn test_zero_previous_price() {
        let stats = price_stats(&series(&[0.0, 1.0]));
        assert_eq!(stats.change, 1.0);
        assert_eq!(stats.change_pct, 0.0);
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(price_stats(&[]), PriceStats::default());
    }
}
