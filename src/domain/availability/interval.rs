//! Half-open stay interval
//!
//! A stay occupies `[check_in, check_out)`: the guest sleeps on every
//! night from check-in up to but not including the check-out day, so a
//! departure and an arrival on the same date never conflict.

use chrono::NaiveDate;

use crate::domain::error::IntervalError;

/// A validated `[check_in, check_out)` date range.
///
/// Construction goes through [`StayInterval::new`], which enforces the
/// minimum one-night stay, so the overlap predicate never sees a
/// zero-length or inverted interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayInterval {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayInterval {
    /// Build an interval, rejecting `check_out <= check_in`.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, IntervalError> {
        if check_out <= check_in {
            return Err(IntervalError::NonPositiveDuration);
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Parse `YYYY-MM-DD` strings and build an interval.
    ///
    /// Checks run in order: both dates must parse (`BadDate`), then the
    /// duration must be positive (`NonPositiveDuration`).
    pub fn parse(check_in: &str, check_out: &str) -> Result<Self, IntervalError> {
        let check_in = check_in
            .parse::<NaiveDate>()
            .map_err(|_| IntervalError::BadDate)?;
        let check_out = check_out
            .parse::<NaiveDate>()
            .map_err(|_| IntervalError::BadDate)?;
        Self::new(check_in, check_out)
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of nights in the stay. Always >= 1.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Half-open overlap: `a.start < b.end && b.start < a.end`.
    ///
    /// Touching intervals (`a.check_out == b.check_in`) do not overlap;
    /// same-day turnover is allowed.
    pub fn overlaps(&self, other: &StayInterval) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// Whether the given night (the night starting on `date`) falls
    /// inside the stay.
    pub fn contains_night(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }

    /// Number of nights this stay and `range` have in common.
    ///
    /// Used by occupancy reporting so a stay straddling the queried
    /// range only counts the nights inside it.
    pub fn overlap_nights(&self, range: &StayInterval) -> i64 {
        let start = self.check_in.max(range.check_in);
        let end = self.check_out.min(range.check_out);
        (end - start).num_days().max(0)
    }
}

impl std::fmt::Display for StayInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.check_in, self.check_out)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn interval(check_in: &str, check_out: &str) -> StayInterval {
        StayInterval::new(date(check_in), date(check_out)).unwrap()
    }

    #[test]
    fn rejects_zero_length() {
        let d = date("2025-12-25");
        assert_eq!(
            StayInterval::new(d, d),
            Err(IntervalError::NonPositiveDuration)
        );
    }

    #[test]
    fn rejects_inverted() {
        assert_eq!(
            StayInterval::new(date("2025-12-28"), date("2025-12-25")),
            Err(IntervalError::NonPositiveDuration)
        );
    }

    #[test]
    fn parse_rejects_bad_dates_first() {
        assert_eq!(
            StayInterval::parse("not-a-date", "2025-12-28"),
            Err(IntervalError::BadDate)
        );
        assert_eq!(
            StayInterval::parse("2025-12-28", "2025-02-30"),
            Err(IntervalError::BadDate)
        );
        // Both parse, but inverted
        assert_eq!(
            StayInterval::parse("2025-12-28", "2025-12-25"),
            Err(IntervalError::NonPositiveDuration)
        );
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let a = interval("2025-12-25", "2025-12-28");
        let b = interval("2025-12-28", "2025-12-30");
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            ("2025-12-25", "2025-12-28", "2025-12-27", "2025-12-29"),
            ("2025-12-25", "2025-12-28", "2025-12-20", "2025-12-26"),
            ("2025-12-01", "2025-12-31", "2025-12-10", "2025-12-11"),
            ("2025-12-25", "2025-12-28", "2026-01-01", "2026-01-05"),
        ];
        for (a1, a2, b1, b2) in cases {
            let a = interval(a1, a2);
            let b = interval(b1, b2);
            assert_eq!(a.overlaps(&b), b.overlaps(&a), "{a} vs {b}");
        }
    }

    #[test]
    fn overlapping_last_night_conflicts() {
        let existing = interval("2025-12-25", "2025-12-28");
        let candidate = interval("2025-12-27", "2025-12-29");
        assert!(existing.overlaps(&candidate));
    }

    #[test]
    fn overlapping_first_night_conflicts() {
        let existing = interval("2025-12-25", "2025-12-28");
        let candidate = interval("2025-12-20", "2025-12-26");
        assert!(existing.overlaps(&candidate));
    }

    #[test]
    fn contained_interval_conflicts() {
        let outer = interval("2025-12-01", "2025-12-31");
        let inner = interval("2025-12-10", "2025-12-12");
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn nights_counts_days() {
        assert_eq!(interval("2025-12-25", "2025-12-28").nights(), 3);
        assert_eq!(interval("2025-12-25", "2025-12-26").nights(), 1);
    }

    #[test]
    fn contains_night_excludes_checkout_day() {
        let stay = interval("2025-12-25", "2025-12-28");
        assert!(stay.contains_night(date("2025-12-25")));
        assert!(stay.contains_night(date("2025-12-27")));
        assert!(!stay.contains_night(date("2025-12-28")));
        assert!(!stay.contains_night(date("2025-12-24")));
    }

    #[test]
    fn overlap_nights_clamps_to_range() {
        let stay = interval("2025-12-28", "2026-01-04");
        let range = interval("2025-12-01", "2026-01-01");
        // Only the nights of Dec 28, 29, 30, 31 fall inside the range.
        assert_eq!(stay.overlap_nights(&range), 4);

        let disjoint = interval("2025-11-01", "2025-11-05");
        assert_eq!(stay.overlap_nights(&disjoint), 0);
    }
}
