//! Work-location and schedule configuration models.
//!
//! This module defines the read-only configuration snapshot that the caller
//! threads through every evaluation: the geofence, the weekly work pattern
//! with Friday-specific overrides, grace periods, overtime rates, and the
//! holiday calendar.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A geographic point in decimal degrees.
///
/// # Example
///
/// ```
/// use attendance_engine::models::Coordinate;
///
/// let office = Coordinate {
///     latitude: -6.2088,
///     longitude: 106.8456,
/// };
/// assert!(office.latitude < 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees (positive north).
    pub latitude: f64,
    /// Longitude in decimal degrees (positive east).
    pub longitude: f64,
}

/// The accepted work-location boundary: a circle around a configured center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeofenceConfig {
    /// The center of the accepted area.
    pub center: Coordinate,
    /// The radius of the accepted area in meters.
    pub radius_meters: f64,
}

/// The active work-schedule configuration.
///
/// One configuration is active at a time; it is mutated by administrators
/// through the surrounding system and supplied to this crate as a read-only
/// snapshot per call. Weekdays are numbered 0 = Monday through 6 = Sunday.
///
/// # Example
///
/// ```
/// use attendance_engine::models::WorkSettings;
/// use chrono::{NaiveTime, Weekday};
///
/// let settings = WorkSettings::standard_week(
///     "Asia/Jakarta",
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     10,
/// );
/// assert!(settings.contains_weekday(Weekday::Mon));
/// assert!(!settings.contains_weekday(Weekday::Sat));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSettings {
    /// IANA timezone name the schedule is expressed in (e.g. "Asia/Jakarta").
    pub timezone: String,
    /// Working weekdays, numbered 0 = Monday through 6 = Sunday.
    pub workdays: BTreeSet<u8>,
    /// Scheduled start of the working day.
    pub start_time: NaiveTime,
    /// Scheduled end of the working day.
    pub end_time: NaiveTime,
    /// Friday-specific start time, when Fridays differ.
    #[serde(default)]
    pub friday_start_time: Option<NaiveTime>,
    /// Friday-specific end time, when Fridays differ.
    #[serde(default)]
    pub friday_end_time: Option<NaiveTime>,
    /// Minutes after the scheduled start during which a check-in is still
    /// on time.
    pub grace_minutes: u32,
    /// Friday-specific grace period, when Fridays differ.
    #[serde(default)]
    pub friday_grace_minutes: Option<u32>,
    /// Overtime pay multiplier applied on workdays.
    pub overtime_rate_workday: Decimal,
    /// Overtime pay multiplier applied on holidays and non-workdays.
    pub overtime_rate_holiday: Decimal,
    /// Base hourly wage used for overtime amounts.
    pub hourly_base_wage: Decimal,
}

impl WorkSettings {
    /// Builds a Monday-to-Friday configuration with uniform hours.
    ///
    /// Overtime rates default to 0.5 (workday) and 0.75 (holiday) with a
    /// zero base wage; callers that compute amounts set their own rates.
    pub fn standard_week(
        timezone: &str,
        start_time: NaiveTime,
        end_time: NaiveTime,
        grace_minutes: u32,
    ) -> Self {
        Self {
            timezone: timezone.to_string(),
            workdays: (0u8..=4).collect(),
            start_time,
            end_time,
            friday_start_time: None,
            friday_end_time: None,
            grace_minutes,
            friday_grace_minutes: None,
            overtime_rate_workday: Decimal::new(5, 1),
            overtime_rate_holiday: Decimal::new(75, 2),
            hourly_base_wage: Decimal::ZERO,
        }
    }

    /// Parses the configured IANA timezone.
    ///
    /// A missing or unknown zone is a fatal configuration error; the engine
    /// never silently falls back to UTC.
    pub fn tz(&self) -> EngineResult<Tz> {
        Tz::from_str(&self.timezone).map_err(|_| EngineError::InvalidTimezone {
            timezone: self.timezone.clone(),
        })
    }

    /// Returns true if the given weekday is part of the configured work week.
    pub fn contains_weekday(&self, weekday: Weekday) -> bool {
        self.workdays
            .contains(&(weekday.num_days_from_monday() as u8))
    }
}

/// A single holiday entry in the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The calendar date of the holiday, in the work timezone.
    pub date: NaiveDate,
    /// A short note describing the holiday.
    #[serde(default)]
    pub note: String,
}

/// The set of holidays the schedule resolver consults.
///
/// Membership is by calendar date only; holidays have no time component.
/// A date that is both a configured workday and a holiday resolves as a
/// non-workday.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    entries: BTreeMap<NaiveDate, String>,
}

impl HolidayCalendar {
    /// Builds a calendar from a list of holiday entries.
    pub fn new(holidays: impl IntoIterator<Item = Holiday>) -> Self {
        Self {
            entries: holidays.into_iter().map(|h| (h.date, h.note)).collect(),
        }
    }

    /// An empty calendar, for callers with no configured holidays.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if the given date is a holiday.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.entries.contains_key(&date)
    }

    /// Returns the note for a holiday date, if the date is one.
    pub fn note(&self, date: NaiveDate) -> Option<&str> {
        self.entries.get(&date).map(String::as_str)
    }

    /// The number of holidays in the calendar.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the calendar has no holidays.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Returns the weekday of a date as the 0 = Monday .. 6 = Sunday number the
/// configuration uses.
pub fn weekday_number(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}
