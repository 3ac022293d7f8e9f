//! Check-in evaluation.
//!
//! Turns a raw check-in event into a lateness verdict and a geofence flag.
//! A check-in outside the fence is flagged, never rejected: GPS noise near
//! a boundary must not block legitimate attendance.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{AttendanceEvent, GeofenceConfig, HolidayCalendar, LatenessStatus, WorkSettings};

use super::geo::is_within_geofence;
use super::schedule::resolve_day;

/// The evaluated outcome of a check-in.
///
/// Produced by [`evaluate_check_in`] and merged into the attendance record
/// with [`CheckInAssessment::apply`]; the write itself is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInAssessment {
    /// Lateness verdict for the check-in.
    pub lateness: LatenessStatus,
    /// Minutes beyond the grace window; zero when on time or not applicable.
    pub minutes_late: i64,
    /// Whether the reported location fell inside the geofence.
    pub within_geofence: bool,
    /// Whether the date resolved as a working day.
    pub is_workday: bool,
}

/// Evaluates a check-in event against the schedule and geofence.
///
/// The check-in timestamp is converted to local wall time in the configured
/// work timezone, then compared against the resolved start time plus the
/// grace window:
///
/// ```text
/// minutes_late = max(0, check_in_minute_of_day - start_minute_of_day - grace)
/// ```
///
/// On a non-workday no lateness verdict applies
/// ([`LatenessStatus::NotApplicable`]), but the geofence is still checked.
/// A missing or invalid coordinate degrades to `within_geofence = false`
/// rather than failing.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidTimezone`] when the
/// configured timezone does not parse. This is the only failure mode;
/// lateness itself never fails on well-formed input.
pub fn evaluate_check_in(
    event: &AttendanceEvent,
    settings: &WorkSettings,
    holidays: &HolidayCalendar,
    fence: &GeofenceConfig,
) -> EngineResult<CheckInAssessment> {
    let tz = settings.tz()?;
    let day = resolve_day(event.date_local, settings, holidays);

    let within_geofence = event
        .check_in_coordinate
        .map(|point| is_within_geofence(point, fence))
        .unwrap_or(false);

    let (lateness, minutes_late) = match event.check_in_utc {
        Some(check_in_utc) if day.is_workday => {
            let local = check_in_utc.with_timezone(&tz);
            let check_in_minute = i64::from(local.time().num_seconds_from_midnight() / 60);
            let start_minute = i64::from(day.start_time.num_seconds_from_midnight() / 60);
            let minutes_late =
                (check_in_minute - start_minute - i64::from(day.grace_minutes)).max(0);
            if minutes_late > 0 {
                (LatenessStatus::Late, minutes_late)
            } else {
                (LatenessStatus::OnTime, 0)
            }
        }
        // Non-workday check-ins carry no lateness penalty; absent check-ins
        // have nothing to judge.
        _ => (LatenessStatus::NotApplicable, 0),
    };

    Ok(CheckInAssessment {
        lateness,
        minutes_late,
        within_geofence,
        is_workday: day.is_workday,
    })
}

impl CheckInAssessment {
    /// Merges this assessment into an attendance record, returning the
    /// updated value. Pure; the caller performs the write.
    pub fn apply(&self, event: &AttendanceEvent) -> AttendanceEvent {
        let mut updated = event.clone();
        updated.lateness = self.lateness;
        updated.minutes_late = self.minutes_late;
        updated.within_geofence_in = self.within_geofence;
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, Holiday};
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

    const OFFICE: Coordinate = Coordinate {
        latitude: -6.2088,
        longitude: 106.8456,
    };

    fn fence() -> GeofenceConfig {
        GeofenceConfig {
            center: OFFICE,
            radius_meters: 100.0,
        }
    }

    fn settings() -> WorkSettings {
        let mut s = WorkSettings::standard_week(
            "Asia/Jakarta",
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            10,
        );
        s.hourly_base_wage = rust_decimal::Decimal::from(20);
        s
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// Builds a Monday event checked in at the given Jakarta wall time.
    /// Asia/Jakarta is UTC+7 year-round.
    fn event_checked_in_at(h: u32, m: u32) -> AttendanceEvent {
        let mut event = AttendanceEvent::new("emp-001", make_date("2026-03-02"));
        event.check_in_utc = Some(Utc.with_ymd_and_hms(2026, 3, 2, h - 7, m, 0).unwrap());
        event.check_in_coordinate = Some(OFFICE);
        event
    }

    /// CI-001: check-in at the grace boundary is on time.
    #[test]
    fn test_ci_001_check_in_at_grace_limit_is_on_time() {
        let event = event_checked_in_at(9, 10);
        let result =
            evaluate_check_in(&event, &settings(), &HolidayCalendar::empty(), &fence()).unwrap();
        assert_eq!(result.lateness, LatenessStatus::OnTime);
        assert_eq!(result.minutes_late, 0);
    }

    /// CI-002: one minute past grace is one minute late.
    #[test]
    fn test_ci_002_one_minute_past_grace_is_late() {
        let event = event_checked_in_at(9, 11);
        let result =
            evaluate_check_in(&event, &settings(), &HolidayCalendar::empty(), &fence()).unwrap();
        assert_eq!(result.lateness, LatenessStatus::Late);
        assert_eq!(result.minutes_late, 1);
    }

    /// CI-003: early check-in is on time, not negative.
    #[test]
    fn test_ci_003_early_check_in_is_on_time() {
        let event = event_checked_in_at(8, 59);
        let result =
            evaluate_check_in(&event, &settings(), &HolidayCalendar::empty(), &fence()).unwrap();
        assert_eq!(result.lateness, LatenessStatus::OnTime);
        assert_eq!(result.minutes_late, 0);
    }

    /// CI-004: non-workday check-in has no lateness verdict but the fence
    /// still applies.
    #[test]
    fn test_ci_004_holiday_check_in_is_not_judged_for_lateness() {
        let holidays = HolidayCalendar::new(vec![Holiday {
            date: make_date("2026-03-02"),
            note: "holiday".to_string(),
        }]);
        let event = event_checked_in_at(11, 30);
        let result = evaluate_check_in(&event, &settings(), &holidays, &fence()).unwrap();
        assert_eq!(result.lateness, LatenessStatus::NotApplicable);
        assert_eq!(result.minutes_late, 0);
        assert!(result.within_geofence);
        assert!(!result.is_workday);
    }

    /// CI-005: outside the fence is flagged, never an error.
    #[test]
    fn test_ci_005_outside_fence_is_flagged_not_rejected() {
        let mut event = event_checked_in_at(8, 55);
        event.check_in_coordinate = Some(Coordinate {
            latitude: -6.19,
            longitude: 106.8456,
        });
        let result =
            evaluate_check_in(&event, &settings(), &HolidayCalendar::empty(), &fence()).unwrap();
        assert!(!result.within_geofence);
        assert_eq!(result.lateness, LatenessStatus::OnTime);
    }

    /// CI-006: missing coordinate degrades to an out-of-fence flag.
    #[test]
    fn test_ci_006_missing_coordinate_degrades_gracefully() {
        let mut event = event_checked_in_at(8, 55);
        event.check_in_coordinate = None;
        let result =
            evaluate_check_in(&event, &settings(), &HolidayCalendar::empty(), &fence()).unwrap();
        assert!(!result.within_geofence);
    }

    /// CI-007: missing check-in yields no verdict.
    #[test]
    fn test_ci_007_absent_check_in_is_not_applicable() {
        let event = AttendanceEvent::new("emp-001", make_date("2026-03-02"));
        let result =
            evaluate_check_in(&event, &settings(), &HolidayCalendar::empty(), &fence()).unwrap();
        assert_eq!(result.lateness, LatenessStatus::NotApplicable);
        assert_eq!(result.minutes_late, 0);
    }

    /// CI-008: an unparseable timezone is a fatal configuration error.
    #[test]
    fn test_ci_008_invalid_timezone_is_fatal() {
        let mut bad = settings();
        bad.timezone = "Not/AZone".to_string();
        let event = event_checked_in_at(9, 0);
        let result = evaluate_check_in(&event, &bad, &HolidayCalendar::empty(), &fence());
        assert!(matches!(
            result,
            Err(crate::error::EngineError::InvalidTimezone { .. })
        ));
    }

    #[test]
    fn test_apply_merges_verdict_into_event() {
        let event = event_checked_in_at(9, 30);
        let assessment =
            evaluate_check_in(&event, &settings(), &HolidayCalendar::empty(), &fence()).unwrap();
        let updated = assessment.apply(&event);
        assert_eq!(updated.lateness, LatenessStatus::Late);
        assert_eq!(updated.minutes_late, 20);
        assert!(updated.within_geofence_in);
        // raw fields untouched
        assert_eq!(updated.check_in_utc, event.check_in_utc);
        assert_eq!(updated.date_local, event.date_local);
    }
}
