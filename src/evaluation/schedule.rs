//! Day schedule resolution.
//!
//! Given a calendar date, the active [`WorkSettings`], and the
//! [`HolidayCalendar`], this module decides whether the date is a workday
//! and which start/end times and grace window apply. Holidays always win
//! over the weekday pattern: a configured workday that is also a holiday
//! resolves as a non-workday.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::{HolidayCalendar, WorkSettings};

/// The resolved schedule for one calendar date.
///
/// Non-workdays still carry the times that *would* apply, so that holiday
/// overtime can be priced against the schedule the date replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// Whether the date is a working day.
    pub is_workday: bool,
    /// The applicable scheduled start time.
    pub start_time: NaiveTime,
    /// The applicable scheduled end time.
    pub end_time: NaiveTime,
    /// The applicable grace window in minutes.
    pub grace_minutes: u32,
}

/// Resolves the schedule for a date.
///
/// A date is a non-workday if its weekday is not in `settings.workdays`,
/// or if it appears in the holiday calendar. On Fridays the
/// `friday_start_time` / `friday_end_time` / `friday_grace_minutes`
/// overrides apply where configured, falling back per-field to the
/// defaults.
///
/// # Example
///
/// ```
/// use attendance_engine::evaluation::resolve_day;
/// use attendance_engine::models::{HolidayCalendar, WorkSettings};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let settings = WorkSettings::standard_week(
///     "Asia/Jakarta",
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     10,
/// );
/// // 2026-03-02 is a Monday
/// let day = resolve_day(
///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     &settings,
///     &HolidayCalendar::empty(),
/// );
/// assert!(day.is_workday);
/// assert_eq!(day.grace_minutes, 10);
/// ```
pub fn resolve_day(
    date: NaiveDate,
    settings: &WorkSettings,
    holidays: &HolidayCalendar,
) -> DaySchedule {
    let weekday = date.weekday();
    let is_workday = settings.contains_weekday(weekday) && !holidays.contains(date);

    let (start_time, end_time, grace_minutes) = if weekday == Weekday::Fri {
        (
            settings.friday_start_time.unwrap_or(settings.start_time),
            settings.friday_end_time.unwrap_or(settings.end_time),
            settings.friday_grace_minutes.unwrap_or(settings.grace_minutes),
        )
    } else {
        (settings.start_time, settings.end_time, settings.grace_minutes)
    };

    DaySchedule {
        is_workday,
        start_time,
        end_time,
        grace_minutes,
    }
}

/// Minutes of scheduled work the day requires.
///
/// A workday requires `end_time - start_time` minutes; a holiday or
/// non-workday requires zero, so every worked minute counts as overtime.
pub fn required_minutes(day: &DaySchedule) -> i64 {
    if !day.is_workday {
        return 0;
    }
    (day.end_time - day.start_time).num_minutes().max(0)
}
