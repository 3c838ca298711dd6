//! Bounded, validated date ranges for historical lookups.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// Hard cap on rows produced by one historical submission
pub const MAX_RANGE_DAYS: usize = 7;

/// An inclusive calendar-date range spanning at most seven days.
///
/// Construction validates ordering and span; an over-long range is rejected
/// outright, never truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DashboardError> {
        if end < start {
            return Err(DashboardError::validation(
                "Error: End date must not be before the start date.",
            ));
        }
        if (end - start).num_days() >= MAX_RANGE_DAYS as i64 {
            return Err(DashboardError::validation(
                "Error: Date range must be 7 days or less.",
            ));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days (== rows) this range produces
    #[must_use]
    pub fn len(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Days in ascending calendar order, defensively capped at
    /// [`MAX_RANGE_DAYS`] even if the date arithmetic would continue.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end = self.end;
        self.start
            .iter_days()
            .take_while(move |day| *day <= end)
            .take(MAX_RANGE_DAYS)
    }

    /// Display span for the status message, e.g. `06/01/2026 - 06/07/2026`
    #[must_use]
    pub fn display_span(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%m/%d/%Y"),
            self.end.format("%m/%d/%Y")
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(date(2026, 6, 1), date(2026, 6, 1), 1)]
    #[case(date(2026, 6, 1), date(2026, 6, 4), 4)]
    #[case(date(2026, 6, 1), date(2026, 6, 7), 7)]
    // month boundary
    #[case(date(2026, 5, 28), date(2026, 6, 3), 7)]
    fn test_valid_ranges_emit_expected_row_count(
        #[case] start: NaiveDate,
        #[case] end: NaiveDate,
        #[case] expected: usize,
    ) {
        let range = DateRange::new(start, end).unwrap();
        assert_eq!(range.len(), expected);
        let days: Vec<_> = range.iter().collect();
        assert_eq!(days.len(), expected);
        assert!(days.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(days.first(), Some(&start));
        assert_eq!(days.last(), Some(&end));
    }

    #[test]
    fn test_eight_day_range_rejected_not_truncated() {
        let result = DateRange::new(date(2026, 6, 1), date(2026, 6, 8));
        let err = result.unwrap_err();
        assert!(matches!(err, DashboardError::Validation { .. }));
        assert!(err.user_message().contains("7 days or less"));
    }

    #[test]
    fn test_backwards_range_rejected() {
        let result = DateRange::new(date(2026, 6, 8), date(2026, 6, 1));
        assert!(result.is_err());
    }

    #[test]
    fn test_iteration_never_exceeds_cap() {
        let range = DateRange::new(date(2026, 6, 1), date(2026, 6, 7)).unwrap();
        assert!(range.iter().count() <= MAX_RANGE_DAYS);
    }

    #[test]
    fn test_display_span() {
        let range = DateRange::new(date(2026, 6, 1), date(2026, 6, 7)).unwrap();
        assert_eq!(range.display_span(), "06/01/2026 - 06/07/2026");
    }
}
