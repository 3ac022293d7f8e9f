//! Attendance-correction workflow.
//!
//! A correction moves through `pending -> approved | rejected`, with no
//! re-opening. Approval converts the proposed wall-clock times to UTC,
//! writes them into a copy of the attendance record, and re-runs the
//! evaluators so lateness and worked minutes stay consistent. The caller
//! persists the returned values; this module mutates nothing it was given.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::evaluation::{evaluate_check_in, evaluate_check_out};
use crate::models::{
    AttendanceEvent, CorrectionRequest, CorrectionStatus, CorrectionType, GeofenceConfig,
    HolidayCalendar, WorkSettings,
};

/// The result of deciding a correction request.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionOutcome {
    /// The decided request with status and audit fields set.
    pub request: CorrectionRequest,
    /// The re-evaluated attendance record, present only on approval.
    /// The caller performs the write.
    pub updated_event: Option<AttendanceEvent>,
}

/// Submits a correction request for an attendance record.
///
/// The proposed times must match the correction type:
/// - [`CorrectionType::MissingCheckIn`] requires exactly a proposed
///   check-in, and the record must have no check-in yet;
/// - [`CorrectionType::MissingCheckOut`] requires exactly a proposed
///   check-out, and the record must have no check-out yet;
/// - [`CorrectionType::Edit`] may override either or both times, even when
///   already present, and requires at least one proposed time.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] when the proposed times do not match
/// the type or the record already holds the time the request claims is
/// missing.
pub fn submit_correction(
    employee_id: &str,
    date_local: NaiveDate,
    correction_type: CorrectionType,
    proposed_check_in_local: Option<NaiveDateTime>,
    proposed_check_out_local: Option<NaiveDateTime>,
    reason: &str,
    existing: &AttendanceEvent,
) -> EngineResult<CorrectionRequest> {
    match correction_type {
        CorrectionType::MissingCheckIn => {
            if existing.check_in_utc.is_some() {
                return Err(EngineError::Validation {
                    message: format!(
                        "attendance for {date_local} already has a check-in; use an edit"
                    ),
                });
            }
            if proposed_check_in_local.is_none() || proposed_check_out_local.is_some() {
                return Err(EngineError::Validation {
                    message: "missing_check_in requires exactly a proposed check-in time"
                        .to_string(),
                });
            }
        }
        CorrectionType::MissingCheckOut => {
            if existing.check_out_utc.is_some() {
                return Err(EngineError::Validation {
                    message: format!(
                        "attendance for {date_local} already has a check-out; use an edit"
                    ),
                });
            }
            if proposed_check_out_local.is_none() || proposed_check_in_local.is_some() {
                return Err(EngineError::Validation {
                    message: "missing_check_out requires exactly a proposed check-out time"
                        .to_string(),
                });
            }
        }
        CorrectionType::Edit => {
            if proposed_check_in_local.is_none() && proposed_check_out_local.is_none() {
                return Err(EngineError::Validation {
                    message: "edit requires at least one proposed time".to_string(),
                });
            }
        }
    }

    let request = CorrectionRequest {
        id: Uuid::new_v4(),
        employee_id: employee_id.to_string(),
        date_local,
        correction_type,
        proposed_check_in_local,
        proposed_check_out_local,
        reason: reason.to_string(),
        status: CorrectionStatus::Pending,
        reviewed_by: None,
        reviewed_at: None,
        decision_note: None,
    };

    info!(
        request_id = %request.id,
        employee_id,
        date = %date_local,
        correction_type = %correction_type,
        "correction request submitted"
    );

    Ok(request)
}

/// Decides a pending correction request.
///
/// Legal only from [`CorrectionStatus::Pending`]; a decided request is
/// immutable and a second decision fails with [`EngineError::InvalidState`]
/// without touching any field.
///
/// On approval the proposed wall-clock times are converted to UTC in the
/// work timezone and written into a copy of the attendance record, then
/// both evaluators are re-run on the updated record so lateness, worked
/// minutes, and the provisional overtime figure reflect the corrected
/// times. The stored coordinates are unchanged (a correction moves times,
/// not places), so the geofence flags re-evaluate to their prior values.
///
/// On rejection only the request's status and audit fields change.
///
/// Authorization is the caller's concern; this function records who
/// decided, it does not check that they may.
pub fn decide_correction(
    request: &CorrectionRequest,
    approve: bool,
    actor: &str,
    decision_note: Option<&str>,
    event: &AttendanceEvent,
    settings: &WorkSettings,
    holidays: &HolidayCalendar,
    fence: &GeofenceConfig,
    now: DateTime<Utc>,
) -> EngineResult<CorrectionOutcome> {
    if request.status != CorrectionStatus::Pending {
        return Err(EngineError::InvalidState {
            entity: "correction request".to_string(),
            status: request.status.to_string(),
            action: "decide".to_string(),
        });
    }

    let mut decided = request.clone();
    decided.reviewed_by = Some(actor.to_string());
    decided.reviewed_at = Some(now);
    decided.decision_note = decision_note.map(str::to_string);

    if !approve {
        decided.status = CorrectionStatus::Rejected;
        info!(request_id = %decided.id, actor, "correction request rejected");
        return Ok(CorrectionOutcome {
            request: decided,
            updated_event: None,
        });
    }

    let tz = settings.tz()?;
    let mut updated = event.clone();
    if let Some(proposed_in) = request.proposed_check_in_local {
        updated.check_in_utc = Some(local_to_utc(proposed_in, tz)?);
    }
    if let Some(proposed_out) = request.proposed_check_out_local {
        updated.check_out_utc = Some(local_to_utc(proposed_out, tz)?);
    }

    let check_in = evaluate_check_in(&updated, settings, holidays, fence)?;
    let updated = check_in.apply(&updated);
    let check_out = evaluate_check_out(&updated, settings, holidays, fence)?;
    let updated = check_out.apply(&updated);

    decided.status = CorrectionStatus::Approved;
    info!(
        request_id = %decided.id,
        actor,
        employee_id = %decided.employee_id,
        date = %decided.date_local,
        "correction request approved and attendance re-evaluated"
    );

    Ok(CorrectionOutcome {
        request: decided,
        updated_event: Some(updated),
    })
}

/// Converts a wall-clock time in the work timezone to UTC.
///
/// DST fold picks the earlier instant; a time inside a DST gap does not
/// exist on the wall clock and is rejected as a validation error.
fn local_to_utc(local: NaiveDateTime, tz: Tz) -> EngineResult<DateTime<Utc>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(EngineError::Validation {
            message: format!("proposed time {local} does not exist in timezone {tz}"),
        }),
    }
}
