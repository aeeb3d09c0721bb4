//! Shift windows: a calendar date plus start/end time-of-day.
//!
//! A window whose end is not after its start runs past midnight, so its end
//! rolls forward to the next calendar day. All overlap arithmetic happens on
//! the normalized [`Span`], never on the raw time-of-day values.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShiftError};

/// A requested or booked shift, as the booking store records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

/// An absolute half-open interval `[start, end)` produced by [`TimeWindow::span`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self { date, start, end }
    }

    /// Build a window from the raw fields of a request.
    ///
    /// # Arguments
    /// - `date` -- calendar date, `YYYY-MM-DD`
    /// - `start` -- time of day, `HH:MM` or `HH:MM:SS`
    /// - `end` -- time of day, `HH:MM` or `HH:MM:SS`
    ///
    /// # Errors
    /// Returns `ShiftError::InvalidRequest` naming the first field that is
    /// missing, blank or unparseable, or `date` for an overnight shift that
    /// would end past the last representable day.
    pub fn parse(date: Option<&str>, start: Option<&str>, end: Option<&str>) -> Result<Self> {
        let date = required("date", date)?;
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
            ShiftError::invalid("date", format!("'{}' is not a YYYY-MM-DD date: {}", date, e))
        })?;
        let start = parse_time_field("start", start)?;
        let end = parse_time_field("end", end)?;

        let window = Self { date, start, end };
        if window.is_overnight() && date.succ_opt().is_none() {
            return Err(ShiftError::invalid(
                "date",
                format!("overnight shift on {} would end past the last supported date", date),
            ));
        }
        Ok(window)
    }

    /// True when the shift runs past midnight (`end <= start`).
    pub fn is_overnight(&self) -> bool {
        self.end <= self.start
    }

    /// Calendar dates the shift occupies: its own date, plus the next one
    /// for overnight shifts.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let next = self.is_overnight().then(|| self.date.succ_opt()).flatten();
        std::iter::once(self.date).chain(next)
    }

    pub fn covers_date(&self, date: NaiveDate) -> bool {
        self.dates().any(|d| d == date)
    }

    /// Normalize into an absolute interval, rolling `end` onto the next day
    /// for overnight shifts. `end == start` therefore spans a full 24 hours.
    ///
    /// An overnight shift on the last representable date ends at
    /// `NaiveDateTime::MAX`. [`TimeWindow::parse`] rejects such requests, but
    /// snapshots deserialized from a store are not validated.
    pub fn span(&self) -> Span {
        let start = self.date.and_time(self.start);
        let end = if self.is_overnight() {
            self.date
                .succ_opt()
                .map_or(NaiveDateTime::MAX, |next| next.and_time(self.end))
        } else {
            self.date.and_time(self.end)
        };
        Span { start, end }
    }

    pub fn duration_minutes(&self) -> i64 {
        self.span().duration_minutes()
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.date.format("%Y-%m-%d"),
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

impl Span {
    /// Two spans overlap iff `a.start < b.end && b.start < a.end`.
    ///
    /// Adjacent spans, where one ends exactly when the other starts, do NOT overlap.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Minutes shared by both spans, 0 when they are disjoint or adjacent.
    pub fn overlap_minutes(&self, other: &Span) -> i64 {
        if !self.overlaps(other) {
            return 0;
        }
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (end - start).num_minutes()
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ShiftError::invalid(field, "is required")),
    }
}

fn parse_time_field(field: &str, value: Option<&str>) -> Result<NaiveTime> {
    let raw = required(field, value)?;
    parse_time(raw).ok_or_else(|| {
        ShiftError::invalid(field, format!("'{}' is not an HH:MM time of day", raw))
    })
}

/// Parse `HH:MM`, falling back to `HH:MM:SS`.
pub(crate) fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

/// Serde adapter rendering times of day as `HH:MM`.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(raw.trim()).ok_or_else(|| {
            de::Error::custom(format!("'{}' is not an HH:MM time of day", raw))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: &str, end: &str) -> TimeWindow {
        TimeWindow::parse(Some("2025-01-10"), Some(start), Some(end)).unwrap()
    }

    #[test]
    fn accepts_seconds_in_times() {
        let w = window("09:00:00", "17:30:00");
        assert_eq!(w.start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(w.end, NaiveTime::from_hms_opt(17, 30, 0).unwrap());
    }

    #[test]
    fn equal_start_and_end_is_a_full_day() {
        assert_eq!(window("08:00", "08:00").duration_minutes(), 24 * 60);
    }

    #[test]
    fn overnight_window_covers_next_date() {
        let w = window("22:00", "02:00");
        let dates: Vec<_> = w.dates().map(|d| d.to_string()).collect();
        assert_eq!(dates, vec!["2025-01-10", "2025-01-11"]);

        let next_day = NaiveDate::from_ymd_opt(2025, 1, 11).unwrap();
        assert!(!window("09:00", "17:00").covers_date(next_day));
    }

    #[test]
    fn overnight_on_last_supported_date_is_rejected() {
        let last = NaiveDate::MAX.format("%Y-%m-%d").to_string();

        let err = TimeWindow::parse(Some(&last), Some("22:00"), Some("02:00")).unwrap_err();
        assert!(matches!(err, ShiftError::InvalidRequest { ref field, .. } if field == "date"));

        let daytime = TimeWindow::parse(Some(&last), Some("09:00"), Some("17:00")).unwrap();
        assert_eq!(daytime.duration_minutes(), 8 * 60);
    }

    #[test]
    fn unvalidated_overnight_on_last_date_saturates() {
        let w = TimeWindow::new(
            NaiveDate::MAX,
            NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(2, 0, 0).unwrap(),
        );

        let span = w.span();
        assert_eq!(span.end, NaiveDateTime::MAX);
        assert!(span.start < span.end);
        assert_eq!(w.dates().count(), 1);
    }

    #[test]
    fn display_uses_short_times() {
        assert_eq!(window("18:00", "23:00").to_string(), "2025-01-10 18:00-23:00");
    }

    #[test]
    fn serializes_times_as_hhmm() {
        let json = serde_json::to_string(&window("22:00", "02:00")).unwrap();
        assert_eq!(json, r#"{"date":"2025-01-10","start":"22:00","end":"02:00"}"#);
    }
}
