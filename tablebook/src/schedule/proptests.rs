//! Property-based tests for window overlap and opening-hours validation.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use super::{ClockTime, OpeningHours, OpeningHoursValidator, TimeWindow};
use crate::error::Error;

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Windows within two days, at minute resolution.
fn window_strategy() -> impl Strategy<Value = TimeWindow> {
    (0i64..2880, 1i64..600).prop_map(|(offset, len)| {
        let start = base() + Duration::minutes(offset);
        TimeWindow::new(start, start + Duration::minutes(len)).unwrap()
    })
}

proptest! {
    #[test]
    fn prop_overlap_is_symmetric(a in window_strategy(), b in window_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn prop_overlap_matches_shared_minute(a in window_strategy(), b in window_strategy()) {
        // Two minute-aligned windows overlap iff some minute start lies in both.
        let mut shared = false;
        let mut instant = a.start();
        while instant < a.end() {
            if b.contains(instant) {
                shared = true;
                break;
            }
            instant += Duration::minutes(1);
        }
        prop_assert_eq!(a.overlaps(&b), shared);
    }

    #[test]
    fn prop_window_overlaps_itself(a in window_strategy()) {
        prop_assert!(a.overlaps(&a));
    }

    #[test]
    fn prop_accepted_slot_lies_within_hours(
        open in 0u16..1200,
        span in 30u16..240,
        offset in 0u16..300,
        duration in 1u32..300,
    ) {
        let close = (open + span).min(1440);
        let hours = OpeningHours::every_day(
            ClockTime::from_minutes_wrapping(i64::from(open)),
            if close == 1440 { ClockTime::END_OF_DAY } else { ClockTime::from_minutes_wrapping(i64::from(close)) },
        );
        let requested = ClockTime::from_minutes_wrapping(i64::from(open + offset));
        let date = base().date();

        match OpeningHoursValidator::validate(&hours, date, &requested.to_string(), duration) {
            Ok(slot) => {
                prop_assert!(slot.time >= slot.open);
                prop_assert!(slot.time < slot.close);
                prop_assert!(u32::from(slot.time.minutes()) + duration <= u32::from(slot.close.minutes()));
            }
            Err(Error::OutsideOpeningHours { .. }) => {
                prop_assert!(requested.minutes() < open || requested.minutes() >= close);
            }
            Err(Error::DurationExceedsClosing { .. }) => {
                prop_assert!(u32::from(requested.minutes()) + duration > u32::from(close));
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}
