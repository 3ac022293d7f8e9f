//! Overtime request workflow.
//!
//! Requests move through `pending -> level1_approved -> approved`, with
//! `rejected` reachable from either non-terminal state. Organizations with
//! single-level review skip the level-1 stage via [`ApprovalPolicy`], which
//! is external policy input and never hardcoded here.
//!
//! Final approval prices the overtime and produces an [`OvertimeGrant`];
//! applying the grant to the attendance record is a separate pure step so
//! the caller controls the write.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::evaluation::resolve_day;
use crate::models::{
    AttendanceEvent, HolidayCalendar, OvertimeRequest, OvertimeStatus, WorkSettings,
};

/// How many review stages an organization requires for overtime.
///
/// Which employees qualify for single-level review is decided by the
/// surrounding authorization layer; this crate only honors the policy it
/// is handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalPolicy {
    /// Level-1 review followed by final review.
    TwoLevel,
    /// Final review only; `pending` requests may be finalized directly.
    SingleLevel,
}

/// An approved, priced overtime figure ready to be written onto the
/// matching attendance record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeGrant {
    /// The employee the grant belongs to.
    pub employee_id: String,
    /// The attendance date the grant applies to.
    pub date_local: NaiveDate,
    /// Approved overtime in whole minutes.
    pub overtime_minutes: i64,
    /// Payable amount: hours x base wage x applicable rate.
    pub overtime_amount: Decimal,
}

/// Maximum claimable overtime hours per request.
///
/// Claims above a full day are rejected at submission.
pub const MAX_OVERTIME_HOURS: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Submits an overtime request.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] when `overtime_hours` is not in
/// `(0, 24]`.
pub fn submit_overtime(
    employee_id: &str,
    date_requested: NaiveDate,
    overtime_hours: Decimal,
    work_description: &str,
) -> EngineResult<OvertimeRequest> {
    if overtime_hours <= Decimal::ZERO || overtime_hours > MAX_OVERTIME_HOURS {
        return Err(EngineError::Validation {
            message: format!("overtime hours must be in (0, 24], got {overtime_hours}"),
        });
    }

    let request = OvertimeRequest {
        id: Uuid::new_v4(),
        employee_id: employee_id.to_string(),
        date_requested,
        overtime_hours,
        work_description: work_description.to_string(),
        status: OvertimeStatus::Pending,
        level1_approved_by: None,
        level1_approved_at: None,
        final_approved_by: None,
        final_approved_at: None,
        decision_note: None,
        overtime_amount: Decimal::ZERO,
    };

    info!(
        request_id = %request.id,
        employee_id,
        date = %date_requested,
        hours = %overtime_hours,
        "overtime request submitted"
    );

    Ok(request)
}

/// Grants level-1 approval. Legal only from [`OvertimeStatus::Pending`].
pub fn approve_level1(
    request: &OvertimeRequest,
    actor: &str,
    note: Option<&str>,
    now: DateTime<Utc>,
) -> EngineResult<OvertimeRequest> {
    if request.status != OvertimeStatus::Pending {
        return Err(invalid_state(request, "approve at level 1"));
    }

    let mut approved = request.clone();
    approved.status = OvertimeStatus::Level1Approved;
    approved.level1_approved_by = Some(actor.to_string());
    approved.level1_approved_at = Some(now);
    approved.decision_note = note.map(str::to_string);

    info!(request_id = %approved.id, actor, "overtime request passed level-1 review");
    Ok(approved)
}

/// Grants final approval and prices the overtime.
///
/// Legal from [`OvertimeStatus::Level1Approved`], or directly from
/// [`OvertimeStatus::Pending`] when the policy is
/// [`ApprovalPolicy::SingleLevel`].
///
/// The amount is `overtime_hours x hourly_base_wage x rate`, where the rate
/// is `overtime_rate_holiday` when the requested date resolves as a holiday
/// or non-workday and `overtime_rate_workday` otherwise.
///
/// Returns the approved request together with the [`OvertimeGrant`] to be
/// applied onto the attendance record via [`apply_overtime_grant`].
pub fn approve_final(
    request: &OvertimeRequest,
    policy: ApprovalPolicy,
    actor: &str,
    note: Option<&str>,
    settings: &WorkSettings,
    holidays: &HolidayCalendar,
    now: DateTime<Utc>,
) -> EngineResult<(OvertimeRequest, OvertimeGrant)> {
    let allowed = match request.status {
        OvertimeStatus::Level1Approved => true,
        OvertimeStatus::Pending => policy == ApprovalPolicy::SingleLevel,
        _ => false,
    };
    if !allowed {
        return Err(invalid_state(request, "finally approve"));
    }

    let mut approved = request.clone();
    finalize(&mut approved, actor, note, settings, holidays, now);
    let grant = grant_for(&approved);

    info!(
        request_id = %approved.id,
        actor,
        amount = %approved.overtime_amount,
        "overtime request approved"
    );

    Ok((approved, grant))
}

/// Rejects a request. Legal from [`OvertimeStatus::Pending`] or
/// [`OvertimeStatus::Level1Approved`]; the attendance record is never
/// touched by a rejection.
pub fn reject_overtime(
    request: &OvertimeRequest,
    actor: &str,
    note: Option<&str>,
    now: DateTime<Utc>,
) -> EngineResult<OvertimeRequest> {
    if request.status.is_terminal() {
        return Err(invalid_state(request, "reject"));
    }

    let mut rejected = request.clone();
    rejected.status = OvertimeStatus::Rejected;
    rejected.final_approved_by = Some(actor.to_string());
    rejected.final_approved_at = Some(now);
    rejected.decision_note = note.map(str::to_string);

    info!(request_id = %rejected.id, actor, "overtime request rejected");
    Ok(rejected)
}

/// Writes an approved grant onto the matching attendance record, replacing
/// the provisional overtime figure. Pure; the caller performs the write.
pub fn apply_overtime_grant(event: &AttendanceEvent, grant: &OvertimeGrant) -> AttendanceEvent {
    let mut updated = event.clone();
    updated.overtime_minutes = grant.overtime_minutes;
    updated.overtime_amount = grant.overtime_amount;
    updated.overtime_approved = true;
    updated
}

/// Returns the overtime rate multiplier applicable on a date: the holiday
/// rate on holidays and non-workdays, the workday rate otherwise.
pub fn overtime_rate_for(
    date: NaiveDate,
    settings: &WorkSettings,
    holidays: &HolidayCalendar,
) -> Decimal {
    if resolve_day(date, settings, holidays).is_workday {
        settings.overtime_rate_workday
    } else {
        settings.overtime_rate_holiday
    }
}

/// Stamps final approval onto a request and prices it. Shared with the
/// summary cascade, which carries its own state gate.
pub(crate) fn finalize(
    request: &mut OvertimeRequest,
    actor: &str,
    note: Option<&str>,
    settings: &WorkSettings,
    holidays: &HolidayCalendar,
    now: DateTime<Utc>,
) {
    let rate = overtime_rate_for(request.date_requested, settings, holidays);
    request.status = OvertimeStatus::Approved;
    request.final_approved_by = Some(actor.to_string());
    request.final_approved_at = Some(now);
    request.decision_note = note.map(str::to_string);
    request.overtime_amount = request.overtime_hours * settings.hourly_base_wage * rate;
}

/// Builds the grant for an approved request.
pub(crate) fn grant_for(request: &OvertimeRequest) -> OvertimeGrant {
    let minutes = (request.overtime_hours * Decimal::from(60))
        .trunc()
        .to_i64()
        .unwrap_or(0);
    OvertimeGrant {
        employee_id: request.employee_id.clone(),
        date_local: request.date_requested,
        overtime_minutes: minutes,
        overtime_amount: request.overtime_amount,
    }
}

fn invalid_state(request: &OvertimeRequest, action: &str) -> EngineError {
    EngineError::InvalidState {
        entity: "overtime request".to_string(),
        status: request.status.to_string(),
        action: action.to_string(),
    }
}
