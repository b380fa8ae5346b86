//! Weekly opening hours and validation of requested booking slots.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

use super::window::TimeWindow;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Longest reservation accepted, in minutes.
pub const MAX_DURATION_MINUTES: u32 = MINUTES_PER_DAY as u32;

/// A time of day with minute precision, written `HH:mm`.
///
/// `24:00` is representable so that a restaurant can close at midnight,
/// but it is only accepted where a closing boundary is expected.
///
/// # Examples
///
/// ```
/// use tablebook::ClockTime;
///
/// let t = ClockTime::parse("9:05").unwrap();
/// assert_eq!(t.to_string(), "09:05");
/// assert!(ClockTime::parse("24:00").is_err());
/// assert!(ClockTime::parse_boundary("24:00").is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Midnight at the start of the day.
    pub const MIDNIGHT: Self = Self(0);

    /// Midnight at the end of the day.
    pub const END_OF_DAY: Self = Self(MINUTES_PER_DAY);

    /// Creates a time from hours and minutes.
    ///
    /// # Errors
    ///
    /// Returns a validation error for hours above 23 or minutes above 59.
    pub fn from_hm(hours: u16, minutes: u16) -> Result<Self> {
        if hours > 23 || minutes > 59 {
            return Err(Self::invalid("time", &format!("{hours}:{minutes:02}")));
        }
        Ok(Self(hours * 60 + minutes))
    }

    /// Parses a time of day in `H:mm` or `HH:mm` form.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the text is malformed or out of range.
    pub fn parse(text: &str) -> Result<Self> {
        let (hours, minutes) = Self::split(text).ok_or_else(|| Self::invalid("time", text))?;
        Self::from_hm(hours, minutes).map_err(|_| Self::invalid("time", text))
    }

    /// Parses an opening-hours boundary, which additionally allows `24:00`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the text is malformed or out of range.
    pub fn parse_boundary(text: &str) -> Result<Self> {
        match Self::split(text) {
            Some((24, 0)) => Ok(Self::END_OF_DAY),
            Some((hours, minutes)) => {
                Self::from_hm(hours, minutes).map_err(|_| Self::invalid("opening_hours", text))
            }
            None => Err(Self::invalid("opening_hours", text)),
        }
    }

    fn split(text: &str) -> Option<(u16, u16)> {
        let (hours, minutes) = text.trim().split_once(':')?;
        if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
            return None;
        }
        if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some((hours.parse().ok()?, minutes.parse().ok()?))
    }

    fn invalid(field: &str, text: &str) -> Error {
        Error::Validation {
            field: field.into(),
            message: format!("'{text}' is not a valid HH:mm time"),
        }
    }

    /// Minutes since midnight.
    #[must_use]
    pub const fn minutes(self) -> u16 {
        self.0
    }

    /// Builds a time from minutes since midnight, wrapping around the day.
    #[must_use]
    pub fn from_minutes_wrapping(minutes: i64) -> Self {
        let wrapped = minutes.rem_euclid(i64::from(MINUTES_PER_DAY));
        // rem_euclid keeps the value within 0..1440
        Self(u16::try_from(wrapped).unwrap_or(0))
    }

    /// Converts to a `chrono` time; `24:00` has no such representation.
    #[must_use]
    pub fn to_naive_time(self) -> Option<NaiveTime> {
        if self.0 >= MINUTES_PER_DAY {
            return None;
        }
        NaiveTime::from_hms_opt(u32::from(self.0 / 60), u32::from(self.0 % 60), 0)
    }

    /// Extracts the time of day from a `chrono` time, dropping seconds.
    #[must_use]
    pub fn from_naive_time(time: NaiveTime) -> Self {
        use chrono::Timelike;
        // hour() < 24 and minute() < 60
        Self(u16::try_from(time.hour() * 60 + time.minute()).unwrap_or(0))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for ClockTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse_boundary(&text).map_err(serde::de::Error::custom)
    }
}

/// Day of the week, ordered Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    /// Sunday.
    Sunday,
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
}

impl DayOfWeek {
    /// All days in Sunday-first order.
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// The weekday a calendar date falls on.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        // num_days_from_sunday is always 0..=6
        Self::ALL[date.weekday().num_days_from_sunday() as usize]
    }

    /// Lowercase English name, as used in opening-hours maps.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "sunday",
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opening and closing time for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DayHours {
    /// First bookable minute.
    pub open: ClockTime,
    /// Closing time; reservations must end by then.
    pub close: ClockTime,
}

impl DayHours {
    /// Creates the hours for a day.
    #[must_use]
    pub const fn new(open: ClockTime, close: ClockTime) -> Self {
        Self { open, close }
    }
}

/// A restaurant's weekly schedule. Days without an entry are closed.
///
/// Serialized as a map from lowercase weekday to `{open, close}`:
///
/// ```
/// use tablebook::{DayOfWeek, OpeningHours};
///
/// let hours: OpeningHours =
///     serde_json::from_str(r#"{"monday": {"open": "09:00", "close": "22:00"}}"#).unwrap();
/// assert!(hours.get(DayOfWeek::Monday).is_some());
/// assert!(hours.get(DayOfWeek::Sunday).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpeningHours(BTreeMap<DayOfWeek, DayHours>);

impl OpeningHours {
    /// Creates an empty (always closed) schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hours for a day.
    #[must_use]
    pub fn with_day(mut self, day: DayOfWeek, open: ClockTime, close: ClockTime) -> Self {
        self.0.insert(day, DayHours::new(open, close));
        self
    }

    /// Sets the same hours for every day of the week.
    #[must_use]
    pub fn every_day(open: ClockTime, close: ClockTime) -> Self {
        DayOfWeek::ALL
            .into_iter()
            .fold(Self::new(), |hours, day| hours.with_day(day, open, close))
    }

    /// Returns the hours for a day, if open.
    #[must_use]
    pub fn get(&self, day: DayOfWeek) -> Option<&DayHours> {
        self.0.get(&day)
    }

    /// Iterates over open days in Sunday-first order.
    pub fn iter(&self) -> impl Iterator<Item = (DayOfWeek, &DayHours)> {
        self.0.iter().map(|(day, hours)| (*day, hours))
    }

    /// Returns true if the restaurant is never open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A requested slot that passed opening-hours validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedSlot {
    /// Weekday of the requested date.
    pub weekday: DayOfWeek,
    /// Normalized requested start time.
    pub time: ClockTime,
    /// Opening time that day.
    pub open: ClockTime,
    /// Closing time that day.
    pub close: ClockTime,
    /// The `[start, end)` window of the reservation.
    pub window: TimeWindow,
}

/// Validates requested booking slots against opening hours.
pub struct OpeningHoursValidator;

impl OpeningHoursValidator {
    /// Checks that a reservation of `duration_minutes` starting at `time` on
    /// `date` falls entirely within that day's opening hours.
    ///
    /// The start must satisfy `open <= start < close` and the end must
    /// satisfy `end <= close`.
    ///
    /// # Errors
    ///
    /// - `Validation` for a malformed time, a zero or over-long duration, or
    ///   a day whose closing time is not after its opening time
    /// - `ClosedDay` if the schedule has no entry for the weekday
    /// - `OutsideOpeningHours` if the start is before opening or at/after closing
    /// - `DurationExceedsClosing` if the end is after closing, reporting the
    ///   latest start that would still fit
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use tablebook::{ClockTime, Error, OpeningHours, OpeningHoursValidator};
    ///
    /// let hours = OpeningHours::every_day(
    ///     ClockTime::parse("09:00").unwrap(),
    ///     ClockTime::parse("22:00").unwrap(),
    /// );
    /// let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    ///
    /// let err = OpeningHoursValidator::validate(&hours, date, "21:00", 90).unwrap_err();
    /// match err {
    ///     Error::DurationExceedsClosing { latest_start, .. } => assert_eq!(latest_start, "20:30"),
    ///     other => panic!("unexpected error: {other}"),
    /// }
    /// ```
    pub fn validate(
        hours: &OpeningHours,
        date: NaiveDate,
        time: &str,
        duration_minutes: u32,
    ) -> Result<ValidatedSlot> {
        let requested = ClockTime::parse(time)?;

        if duration_minutes == 0 || duration_minutes > MAX_DURATION_MINUTES {
            return Err(Error::Validation {
                field: "duration_minutes".into(),
                message: format!("must be between 1 and {MAX_DURATION_MINUTES} minutes"),
            });
        }

        let weekday = DayOfWeek::of(date);
        let day = hours.get(weekday).ok_or(Error::ClosedDay { weekday })?;

        if day.close <= day.open {
            return Err(Error::Validation {
                field: format!("opening_hours.{weekday}"),
                message: format!("closing time {} is not after opening time {}", day.close, day.open),
            });
        }

        if requested < day.open || requested >= day.close {
            return Err(Error::OutsideOpeningHours {
                time: requested.to_string(),
                open: day.open.to_string(),
                close: day.close.to_string(),
            });
        }

        let end_minutes = u32::from(requested.minutes()) + duration_minutes;
        if end_minutes > u32::from(day.close.minutes()) {
            let latest =
                ClockTime::from_minutes_wrapping(i64::from(day.close.minutes()) - i64::from(duration_minutes));
            return Err(Error::DurationExceedsClosing {
                duration_minutes,
                close: day.close.to_string(),
                latest_start: latest.to_string(),
            });
        }

        // requested < close <= 24:00, so it is a real time of day
        let start_time = requested.to_naive_time().ok_or_else(|| ClockTime::invalid("time", time))?;
        let window = TimeWindow::starting_at(date.and_time(start_time), duration_minutes)?;

        Ok(ValidatedSlot {
            weekday,
            time: requested,
            open: day.open,
            close: day.close,
            window,
        })
    }
}
