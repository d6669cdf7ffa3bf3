use chrono::{Months, NaiveDate};

/// Advance `date` by `months` calendar months. When the day-of-month does not
/// exist in the target month (Jan 31 + 1), the result is the last day of the
/// target month instead of spilling into the next one. `None` past chrono's
/// calendar range.
pub fn add_months_clamped(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_end_of_month_clamping() {
        assert_eq!(add_months_clamped(ymd(2024, 1, 31), 1), Some(ymd(2024, 2, 29)));
        assert_eq!(add_months_clamped(ymd(2023, 1, 31), 1), Some(ymd(2023, 2, 28)));
        assert_eq!(add_months_clamped(ymd(2024, 3, 31), 1), Some(ymd(2024, 4, 30)));
        assert_eq!(add_months_clamped(ymd(2024, 8, 31), 3), Some(ymd(2024, 11, 30)));
    }

    #[test]
    fn test_offsets_are_not_chained() {
        // counted from Jan 31, not from the clamped Feb 29
        assert_eq!(add_months_clamped(ymd(2024, 1, 31), 2), Some(ymd(2024, 3, 31)));
    }

    #[test]
    fn test_year_rollover() {
        assert_eq!(add_months_clamped(ymd(2024, 11, 15), 3), Some(ymd(2025, 2, 15)));
        assert_eq!(add_months_clamped(ymd(2024, 12, 31), 14), Some(ymd(2026, 2, 28)));
        assert_eq!(add_months_clamped(ymd(2024, 5, 10), 0), Some(ymd(2024, 5, 10)));
    }

    #[test]
    fn test_out_of_range_is_none() {
        assert_eq!(add_months_clamped(NaiveDate::MAX, 1), None);
        assert_eq!(add_months_clamped(ymd(2024, 1, 31), u32::MAX), None);
    }
}
