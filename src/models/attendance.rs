//! Attendance event model.
//!
//! An [`AttendanceEvent`] is one employee-day of attendance. Check-in and
//! check-out actions fill the raw fields; the evaluation functions in
//! [`crate::evaluation`] compute the derived fields, which are merged back
//! into the same record by the caller.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Coordinate;

/// The lateness verdict for a check-in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatenessStatus {
    /// Check-in at or before the scheduled start plus grace.
    OnTime,
    /// Check-in after the grace window; `minutes_late` gives the penalty.
    Late,
    /// No verdict: non-workday, or no check-in recorded.
    #[default]
    NotApplicable,
}

impl std::fmt::Display for LatenessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LatenessStatus::OnTime => write!(f, "on_time"),
            LatenessStatus::Late => write!(f, "late"),
            LatenessStatus::NotApplicable => write!(f, "not_applicable"),
        }
    }
}

/// A single employee-day of attendance, raw fields plus evaluated fields.
///
/// `date_local` is the calendar date in the work timezone; the timestamps
/// are UTC. The evaluated fields start at their defaults and are refreshed
/// whenever a check-in, check-out, or approved correction is evaluated.
///
/// # Example
///
/// ```
/// use attendance_engine::models::AttendanceEvent;
/// use chrono::NaiveDate;
///
/// let event = AttendanceEvent::new("emp-017", NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
/// assert!(event.check_in_utc.is_none());
/// assert_eq!(event.total_work_minutes, 0);
/// assert!(!event.overtime_approved);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    /// Identifier of the employee the record belongs to.
    pub employee_id: String,
    /// The calendar date of the record, in the work timezone.
    pub date_local: NaiveDate,
    /// Timestamp of the check-in, if one was recorded.
    pub check_in_utc: Option<DateTime<Utc>>,
    /// Timestamp of the check-out, if one was recorded.
    pub check_out_utc: Option<DateTime<Utc>>,
    /// Location reported with the check-in, if any.
    pub check_in_coordinate: Option<Coordinate>,
    /// Location reported with the check-out, if any.
    pub check_out_coordinate: Option<Coordinate>,

    /// Whether the check-in location fell inside the geofence.
    #[serde(default)]
    pub within_geofence_in: bool,
    /// Whether the check-out location fell inside the geofence.
    #[serde(default)]
    pub within_geofence_out: bool,
    /// Lateness verdict for the check-in.
    #[serde(default)]
    pub lateness: LatenessStatus,
    /// Minutes late beyond the grace window; zero when on time or absent.
    #[serde(default)]
    pub minutes_late: i64,
    /// Whole minutes between check-in and check-out; never negative.
    #[serde(default)]
    pub total_work_minutes: i64,
    /// Minutes worked beyond the required schedule; provisional until an
    /// overtime request for this date is approved.
    #[serde(default)]
    pub overtime_minutes: i64,
    /// Payable overtime amount; set only by an approved overtime request.
    #[serde(default)]
    pub overtime_amount: Decimal,
    /// Whether the overtime figure has passed approval.
    #[serde(default)]
    pub overtime_approved: bool,
    /// Whether the record needs a correction (e.g. check-out without a
    /// paired check-in on the same local date).
    #[serde(default)]
    pub needs_correction: bool,
}

impl AttendanceEvent {
    /// Creates an empty record for one employee-day.
    pub fn new(employee_id: &str, date_local: NaiveDate) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            date_local,
            check_in_utc: None,
            check_out_utc: None,
            check_in_coordinate: None,
            check_out_coordinate: None,
            within_geofence_in: false,
            within_geofence_out: false,
            lateness: LatenessStatus::NotApplicable,
            minutes_late: 0,
            total_work_minutes: 0,
            overtime_minutes: 0,
            overtime_amount: Decimal::ZERO,
            overtime_approved: false,
            needs_correction: false,
        }
    }

    /// Returns `true` once both a check-in and a check-out are recorded.
    pub fn has_paired_times(&self) -> bool {
        self.check_in_utc.is_some() && self.check_out_utc.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_new_event_has_neutral_evaluated_fields() {
        let event = AttendanceEvent::new("emp-001", make_date("2026-03-02"));
        assert_eq!(event.lateness, LatenessStatus::NotApplicable);
        assert_eq!(event.minutes_late, 0);
        assert_eq!(event.overtime_amount, Decimal::ZERO);
        assert!(!event.overtime_approved);
        assert!(!event.needs_correction);
        assert!(!event.has_paired_times());
    }

    #[test]
    fn test_has_paired_times_requires_both_stamps() {
        let mut event = AttendanceEvent::new("emp-001", make_date("2026-03-02"));
        event.check_in_utc = Some(Utc.with_ymd_and_hms(2026, 3, 2, 2, 0, 0).unwrap());
        assert!(!event.has_paired_times());
        event.check_out_utc = Some(Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap());
        assert!(event.has_paired_times());
    }

    #[test]
    fn test_lateness_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&LatenessStatus::NotApplicable).unwrap(),
            "\"not_applicable\""
        );
        assert_eq!(
            serde_json::to_string(&LatenessStatus::OnTime).unwrap(),
            "\"on_time\""
        );
    }

    #[test]
    fn test_event_deserializes_without_evaluated_fields() {
        let json = r#"{
            "employee_id": "emp-001",
            "date_local": "2026-03-02",
            "check_in_utc": null,
            "check_out_utc": null,
            "check_in_coordinate": null,
            "check_out_coordinate": null
        }"#;
        let event: AttendanceEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.lateness, LatenessStatus::NotApplicable);
        assert_eq!(event.total_work_minutes, 0);
    }
}
