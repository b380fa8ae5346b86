//! Half-open time windows.

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A `[start, end)` interval of restaurant-local wall-clock time.
///
/// The end instant is excluded, so a reservation ending at 20:00 and one
/// starting at 20:00 do not overlap.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tablebook::TimeWindow;
///
/// let day = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
/// let first = TimeWindow::starting_at(day.and_hms_opt(18, 0, 0).unwrap(), 120).unwrap();
/// let second = TimeWindow::starting_at(day.and_hms_opt(20, 0, 0).unwrap(), 90).unwrap();
/// assert!(!first.overlaps(&second));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeWindow {
    /// Creates a window from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns a validation error unless `start < end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if start >= end {
            return Err(Error::Validation {
                field: "window".into(),
                message: format!("start {start} must be before end {end}"),
            });
        }
        Ok(Self { start, end })
    }

    /// Creates a window lasting `duration_minutes` from `start`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the duration is zero.
    pub fn starting_at(start: NaiveDateTime, duration_minutes: u32) -> Result<Self> {
        if duration_minutes == 0 {
            return Err(Error::Validation {
                field: "duration_minutes".into(),
                message: "duration must be positive".into(),
            });
        }
        Self::new(start, start + Duration::minutes(i64::from(duration_minutes)))
    }

    /// Inclusive start.
    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Exclusive end.
    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Length of the window in whole minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Returns true if the two half-open windows share any instant.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns true if `instant` lies within `[start, end)`.
    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%Y-%m-%d %H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_touching_windows_do_not_overlap() {
        let a = TimeWindow::new(at(18, 0), at(19, 30)).unwrap();
        let b = TimeWindow::new(at(19, 30), at(21, 0)).unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_partial_and_nested_overlap() {
        let a = TimeWindow::new(at(18, 0), at(19, 30)).unwrap();
        let b = TimeWindow::new(at(19, 29), at(21, 0)).unwrap();
        let inner = TimeWindow::new(at(18, 30), at(19, 0)).unwrap();
        assert!(a.overlaps(&b));
        assert!(a.overlaps(&inner));
        assert!(inner.overlaps(&a));
    }

    #[test]
    fn test_starting_at_computes_end() {
        let w = TimeWindow::starting_at(at(21, 0), 90).unwrap();
        assert_eq!(w.end(), at(22, 30));
        assert_eq!(w.duration_minutes(), 90);
        assert!(w.contains(at(21, 0)));
        assert!(!w.contains(at(22, 30)));
    }

    #[test]
    fn test_empty_window_rejected() {
        assert!(TimeWindow::new(at(18, 0), at(18, 0)).is_err());
        assert!(TimeWindow::starting_at(at(18, 0), 0).is_err());
    }

    #[test]
    fn test_window_may_cross_midnight() {
        let w = TimeWindow::starting_at(at(23, 30), 60).unwrap();
        assert_eq!(w.end().date(), NaiveDate::from_ymd_opt(2025, 6, 3).unwrap());
    }
}
