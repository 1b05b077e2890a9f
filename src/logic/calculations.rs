use crate::models::ToleranceRange;
use chrono::{Datelike, NaiveDate};

pub const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

pub fn hectares_to_square_meters(hectares: f64) -> f64 {
    hectares * SQUARE_METERS_PER_HECTARE
}

/// First day of the given month.
pub fn first_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Last day of the given month, leap years included.
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Shift `date` by `days`, saturating at the ends of the representable range.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let limit = if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX };
    chrono::Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(limit)
}

pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Score a value against a tolerance range on a 0-100 scale.
///
/// The value is clamped into `[min, max]` first. Distance from the optimum is
/// normalized by the span between the optimum and the bound on the value's
/// side, so the optimum scores 100 and either bound scores 0.
pub fn range_score(value: f64, range: &ToleranceRange) -> f64 {
    let clamped = range.clamp(value);
    let spread = if clamped < range.optimal {
        range.optimal - range.min
    } else {
        range.max - range.optimal
    };

    if spread <= 0.0 {
        return if (clamped - range.optimal).abs() < f64::EPSILON {
            100.0
        } else {
            0.0
        };
    }

    let score = 100.0 - 100.0 * (clamped - range.optimal).abs() / spread;
    score.clamp(0.0, 100.0)
}

/// Linear NDVI score: 0 at or below zero, 100 at or above the healthy threshold.
pub fn vegetation_score(ndvi: f64, healthy_threshold: f64) -> f64 {
    if healthy_threshold <= 0.0 {
        return if ndvi > 0.0 { 100.0 } else { 0.0 };
    }
    (ndvi / healthy_threshold * 100.0).clamp(0.0, 100.0)
}

/// Month number of a date, useful alongside season windows.
pub fn month_of(date: NaiveDate) -> u32 {
    date.month()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_days_saturates_instead_of_overflowing() {
        assert_eq!(add_days(date(2025, 11, 1), 45), date(2025, 12, 16));
        assert_eq!(add_days(date(2025, 11, 1), -1), date(2025, 10, 31));
        assert_eq!(add_days(date(2025, 11, 1), 1_000_000_000), NaiveDate::MAX);
        assert_eq!(add_days(date(2025, 11, 1), i64::MIN), NaiveDate::MIN);
    }

    #[test]
    fn month_boundaries() {
        assert_eq!(first_day_of_month(2025, 11), Some(date(2025, 11, 1)));
        assert_eq!(last_day_of_month(2025, 11), Some(date(2025, 11, 30)));
        assert_eq!(last_day_of_month(2025, 12), Some(date(2025, 12, 31)));
        assert_eq!(last_day_of_month(2024, 2), Some(date(2024, 2, 29)));
        assert_eq!(last_day_of_month(2025, 2), Some(date(2025, 2, 28)));
        assert_eq!(first_day_of_month(2025, 13), None);
    }

    #[test]
    fn day_arithmetic() {
        assert_eq!(add_days(date(2025, 11, 1), 45), date(2025, 12, 16));
        assert_eq!(add_days(date(2025, 11, 1), -5), date(2025, 10, 27));
        assert_eq!(days_between(date(2025, 10, 17), date(2025, 11, 1)), 15);
        assert_eq!(days_between(date(2025, 11, 1), date(2025, 10, 17)), -15);
    }

    #[test]
    fn area_conversion() {
        assert!((hectares_to_square_meters(2.0) - 20_000.0).abs() < 0.001);
        assert!((hectares_to_square_meters(0.25) - 2_500.0).abs() < 0.001);
    }

    #[test]
    fn range_score_optimal_and_bounds() {
        let range = ToleranceRange::new(25.0, 75.0, 50.0);
        assert!((range_score(50.0, &range) - 100.0).abs() < 0.001);
        assert!(range_score(25.0, &range).abs() < 0.001);
        assert!(range_score(75.0, &range).abs() < 0.001);
        assert!((range_score(62.5, &range) - 50.0).abs() < 0.001);
    }

    #[test]
    fn range_score_clamps_outside_values() {
        let range = ToleranceRange::new(25.0, 75.0, 50.0);
        assert!(range_score(95.0, &range).abs() < 0.001);
        assert!(range_score(-10.0, &range).abs() < 0.001);
    }

    #[test]
    fn range_score_asymmetric_bounds_score_zero() {
        let range = ToleranceRange::new(5.0, 35.0, 25.0);
        assert!(range_score(5.0, &range).abs() < 0.001);
        assert!(range_score(35.0, &range).abs() < 0.001);
        assert!((range_score(25.0, &range) - 100.0).abs() < 0.001);
        // 15 below optimum over a 20-wide lower side
        assert!((range_score(10.0, &range) - 25.0).abs() < 0.001);
    }

    #[test]
    fn range_score_always_within_bounds() {
        let range = ToleranceRange::new(4.0, 30.0, 18.0);
        for v in [-50.0, 0.0, 4.0, 10.0, 18.0, 22.5, 30.0, 100.0] {
            let score = range_score(v, &range);
            assert!((0.0..=100.0).contains(&score), "score {} for {}", score, v);
        }
    }

    #[test]
    fn degenerate_range() {
        let range = ToleranceRange::new(6.5, 6.5, 6.5);
        assert!((range_score(6.5, &range) - 100.0).abs() < 0.001);
        assert!((range_score(9.0, &range) - 100.0).abs() < 0.001); // clamps onto the optimum
    }

    #[test]
    fn vegetation_score_linear() {
        assert!((vegetation_score(0.6, 0.6) - 100.0).abs() < 0.001);
        assert!((vegetation_score(0.9, 0.6) - 100.0).abs() < 0.001);
        assert!((vegetation_score(0.3, 0.6) - 50.0).abs() < 0.001);
        assert!(vegetation_score(0.0, 0.6).abs() < 0.001);
        assert!(vegetation_score(-0.2, 0.6).abs() < 0.001);
    }
}
