//! Stay date ranges and overlap detection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A half-open stay interval: the guest occupies the room from `check_in`
/// (inclusive) to `check_out` (exclusive).
///
/// The exclusive check-out date is what lets back-to-back stays share a
/// boundary date without conflicting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayDates {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayDates {
    /// Creates a stay, rejecting ranges where check-out is not strictly
    /// after check-in.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, DomainError> {
        if check_out <= check_in {
            return Err(DomainError::EmptyStay {
                check_in,
                check_out,
            });
        }

        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Returns the check-in date (inclusive).
    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Returns the check-out date (exclusive).
    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Returns the number of nights in the stay.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Returns true if the two stays conflict.
    ///
    /// Half-open interval intersection: `self.check_in < other.check_out`
    /// and `self.check_out > other.check_in`.
    pub fn overlaps(&self, other: &StayDates) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }

    /// Returns true if `date` falls within the stay.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }
}

impl std::fmt::Display for StayDates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.check_in, self.check_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stay(start: (i32, u32, u32), end: (i32, u32, u32)) -> StayDates {
        StayDates::new(date(start.0, start.1, start.2), date(end.0, end.1, end.2)).unwrap()
    }

    #[test]
    fn test_rejects_checkout_equal_to_checkin() {
        let day = date(2024, 6, 1);
        let result = StayDates::new(day, day);
        assert!(matches!(result, Err(DomainError::EmptyStay { .. })));
    }

    #[test]
    fn test_rejects_checkout_before_checkin() {
        let result = StayDates::new(date(2024, 6, 3), date(2024, 6, 1));
        assert!(matches!(result, Err(DomainError::EmptyStay { .. })));
    }

    #[test]
    fn test_one_night_stay_is_valid() {
        let stay = StayDates::new(date(2024, 6, 1), date(2024, 6, 2)).unwrap();
        assert_eq!(stay.nights(), 1);
    }

    #[test]
    fn test_overlapping_stays_conflict() {
        let a = stay((2024, 6, 1), (2024, 6, 3));
        let b = stay((2024, 6, 2), (2024, 6, 4));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_contained_stay_conflicts() {
        let outer = stay((2024, 6, 1), (2024, 6, 10));
        let inner = stay((2024, 6, 3), (2024, 6, 5));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_back_to_back_stays_do_not_conflict() {
        let first = stay((2024, 6, 1), (2024, 6, 3));
        let second = stay((2024, 6, 3), (2024, 6, 5));
        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[test]
    fn test_disjoint_stays_do_not_conflict() {
        let a = stay((2024, 6, 1), (2024, 6, 3));
        let b = stay((2024, 6, 10), (2024, 6, 12));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_identical_stays_conflict() {
        let a = stay((2024, 6, 1), (2024, 6, 3));
        let b = stay((2024, 6, 1), (2024, 6, 3));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_contains() {
        let s = stay((2024, 6, 1), (2024, 6, 3));
        assert!(s.contains(date(2024, 6, 1)));
        assert!(s.contains(date(2024, 6, 2)));
        assert!(!s.contains(date(2024, 6, 3)));
        assert!(!s.contains(date(2024, 5, 31)));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let s = stay((2024, 6, 1), (2024, 6, 3));
        let json = serde_json::to_string(&s).unwrap();
        let deserialized: StayDates = serde_json::from_str(&json).unwrap();
        assert_eq!(s, deserialized);
    }
}
