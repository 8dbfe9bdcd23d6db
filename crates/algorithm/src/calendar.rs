//! Business-day calendar for forecast dates.

use chrono::{Datelike, NaiveDate, Weekday};

/// Whether `date` falls Monday through Friday.
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The next `n` business days after `date`.
///
/// A weekend `date` is first rolled forward to Monday, and that Monday is
/// not part of the result. Exchange holidays are not skipped.
pub fn business_days_after(date: NaiveDate, n: usize) -> Vec<NaiveDate> {
    date.iter_days()
        .filter(|d| is_business_day(*d))
        .skip(1)
        .take(n)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_from_friday_skips_weekend() {
        // 2024-03-08 is a Friday
        let days = business_days_after(date(3, 8), 3);
        assert_eq!(days, vec![date(3, 11), date(3, 12), date(3, 13)]);
    }

    #[test]
    fn test_from_wednesday_crosses_weekend() {
        let days = business_days_after(date(3, 6), 5);
        assert_eq!(
            days,
            vec![date(3, 7), date(3, 8), date(3, 11), date(3, 12), date(3, 13)]
        );
    }

    #[test]
    fn test_from_weekend_starts_tuesday() {
        // 2024-03-09 is a Saturday; it rolls to Monday 03-11, which is dropped
        assert_eq!(business_days_after(date(3, 9), 2), vec![date(3, 12), date(3, 13)]);
        assert_eq!(business_days_after(date(3, 10), 1), vec![date(3, 12)]);
    }

    #[test]
    fn test_zero_days() {
        assert!(business_days_after(date(3, 6), 0).is_empty());
    }

    #[test]
    fn test_thirty_days_are_weekdays() {
        let days = business_days_after(date(12, 20), 30);
        assert_eq!(days.len(), 30);
        assert!(days.iter().all(|d| is_business_day(*d)));
        assert!(days.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(days[0], date(12, 23));
    }
}
