//! Check-out evaluation.
//!
//! Computes worked minutes and the provisional overtime figure for a
//! check-out event. The overtime amount in money is never set here; it
//! requires an approved overtime request (see [`crate::workflow`]).

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{AttendanceEvent, GeofenceConfig, HolidayCalendar, WorkSettings};

use super::geo::is_within_geofence;
use super::schedule::{required_minutes, resolve_day};

/// The evaluated outcome of a check-out.
///
/// Produced by [`evaluate_check_out`] and merged into the attendance record
/// with [`CheckOutAssessment::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutAssessment {
    /// Whole minutes between the paired check-in and this check-out,
    /// clamped to zero.
    pub total_work_minutes: i64,
    /// Minutes worked beyond the day's required schedule. Provisional;
    /// payable only once an overtime request is approved.
    pub overtime_minutes: i64,
    /// Whether the reported location fell inside the geofence.
    pub within_geofence: bool,
    /// Set when the check-out has no usable check-in pair on the same
    /// local date, so a correction is needed.
    pub needs_correction: bool,
    /// Whether the date resolved as a working day.
    pub is_workday: bool,
}

/// Evaluates a check-out event against the schedule and geofence.
///
/// Worked minutes are the floor of the check-in/check-out interval, clamped
/// to zero (clock skew never produces negative work). Overtime minutes are
/// the excess over [`required_minutes`] for the day; on a holiday or
/// non-workday the requirement is zero, so every worked minute is overtime.
///
/// A check-out without a check-in pair on the same local date is still
/// evaluated and recorded, but with zero worked minutes and
/// `needs_correction` set, so the employee can file a correction.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidTimezone`] when the
/// configured timezone does not parse.
pub fn evaluate_check_out(
    event: &AttendanceEvent,
    settings: &WorkSettings,
    holidays: &HolidayCalendar,
    fence: &GeofenceConfig,
) -> EngineResult<CheckOutAssessment> {
    let tz = settings.tz()?;
    let day = resolve_day(event.date_local, settings, holidays);

    let within_geofence = event
        .check_out_coordinate
        .map(|point| is_within_geofence(point, fence))
        .unwrap_or(false);

    // The pair is usable only when the check-in falls on the record's
    // local calendar date.
    let paired_check_in = event.check_in_utc.filter(|check_in| {
        check_in.with_timezone(&tz).date_naive() == event.date_local
    });

    let (total_work_minutes, needs_correction) = match (paired_check_in, event.check_out_utc) {
        (Some(check_in), Some(check_out)) => {
            ((check_out - check_in).num_minutes().max(0), false)
        }
        _ => (0, true),
    };

    let overtime_minutes = (total_work_minutes - required_minutes(&day)).max(0);

    Ok(CheckOutAssessment {
        total_work_minutes,
        overtime_minutes,
        within_geofence,
        needs_correction,
        is_workday: day.is_workday,
    })
}

impl CheckOutAssessment {
    /// Merges this assessment into an attendance record, returning the
    /// updated value. The provisional overtime figure is written with
    /// `overtime_approved` left false; only an approved overtime request
    /// flips it. Pure; the caller performs the write.
    pub fn apply(&self, event: &AttendanceEvent) -> AttendanceEvent {
        let mut updated = event.clone();
        updated.total_work_minutes = self.total_work_minutes;
        updated.overtime_minutes = self.overtime_minutes;
        updated.within_geofence_out = self.within_geofence;
        updated.needs_correction = self.needs_correction;
        updated.overtime_approved = false;
        updated
    }
}
