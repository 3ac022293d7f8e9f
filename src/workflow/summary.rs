//! Monthly overtime summary workflow.
//!
//! A summary batches the overtime requests of one year-month and moves
//! through the same two-stage flow as a single request, but its final
//! approval cascades: every not-yet-approved member is finalized in the
//! same call, all-or-nothing. A batch containing any rejected member fails
//! with [`EngineError::PartialState`] and commits nothing; a summary never
//! silently skips members in conflicting states.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    HolidayCalendar, OvertimeRequest, OvertimeStatus, OvertimeSummaryRequest, RequestPeriod,
    WorkSettings,
};

use super::overtime::{ApprovalPolicy, OvertimeGrant, finalize, grant_for};

/// The result of a summary final approval: the decided summary, the
/// cascaded member requests, and one grant per member to apply onto the
/// attendance records. The caller persists all of it in one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryOutcome {
    /// The approved summary with audit fields set.
    pub summary: OvertimeSummaryRequest,
    /// Every member request, in the summary's order, after the cascade.
    pub members: Vec<OvertimeRequest>,
    /// Grants for the members finalized by this cascade. Members that were
    /// already approved keep their earlier grant and do not reappear here.
    pub grants: Vec<OvertimeGrant>,
}

/// Submits a summary over a set of member overtime requests.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] when the member set is empty, a
/// member falls outside the period, or a member is already rejected (a
/// batch is never allowed to paper over a rejection).
pub fn submit_summary(
    period: RequestPeriod,
    members: &[OvertimeRequest],
) -> EngineResult<OvertimeSummaryRequest> {
    if members.is_empty() {
        return Err(EngineError::Validation {
            message: format!("summary for {period} has no member requests"),
        });
    }
    for member in members {
        if !period.contains(member.date_requested) {
            return Err(EngineError::Validation {
                message: format!(
                    "request {} dated {} falls outside period {period}",
                    member.id, member.date_requested
                ),
            });
        }
        if member.status == OvertimeStatus::Rejected {
            return Err(EngineError::Validation {
                message: format!("request {} is already rejected", member.id),
            });
        }
    }

    let summary = OvertimeSummaryRequest {
        id: Uuid::new_v4(),
        request_period: period,
        included_request_ids: members.iter().map(|m| m.id).collect(),
        status: OvertimeStatus::Pending,
        level1_approved_by: None,
        level1_approved_at: None,
        final_approved_by: None,
        final_approved_at: None,
        decision_note: None,
    };

    info!(
        summary_id = %summary.id,
        period = %period,
        members = members.len(),
        "overtime summary submitted"
    );

    Ok(summary)
}

/// Grants level-1 approval on a summary. Legal only from
/// [`OvertimeStatus::Pending`].
pub fn approve_summary_level1(
    summary: &OvertimeSummaryRequest,
    actor: &str,
    note: Option<&str>,
    now: DateTime<Utc>,
) -> EngineResult<OvertimeSummaryRequest> {
    if summary.status != OvertimeStatus::Pending {
        return Err(invalid_state(summary, "approve at level 1"));
    }

    let mut approved = summary.clone();
    approved.status = OvertimeStatus::Level1Approved;
    approved.level1_approved_by = Some(actor.to_string());
    approved.level1_approved_at = Some(now);
    approved.decision_note = note.map(str::to_string);

    info!(summary_id = %approved.id, actor, "overtime summary passed level-1 review");
    Ok(approved)
}

/// Grants final approval on a summary, cascading to every member.
///
/// Legal from [`OvertimeStatus::Level1Approved`], or from
/// [`OvertimeStatus::Pending`] under [`ApprovalPolicy::SingleLevel`]. The
/// summary's own review chain substitutes for per-member stages: members
/// still `pending` or `level1_approved` are finalized here with the usual
/// pricing rule, and members already `approved` pass through untouched.
///
/// # Errors
///
/// - [`EngineError::Validation`] when `members` does not match the
///   summary's included ids exactly.
/// - [`EngineError::PartialState`] when any member is `rejected`; nothing
///   is committed in that case.
pub fn approve_summary_final(
    summary: &OvertimeSummaryRequest,
    members: &[OvertimeRequest],
    policy: ApprovalPolicy,
    actor: &str,
    note: Option<&str>,
    settings: &WorkSettings,
    holidays: &HolidayCalendar,
    now: DateTime<Utc>,
) -> EngineResult<SummaryOutcome> {
    let allowed = match summary.status {
        OvertimeStatus::Level1Approved => true,
        OvertimeStatus::Pending => policy == ApprovalPolicy::SingleLevel,
        _ => false,
    };
    if !allowed {
        return Err(invalid_state(summary, "finally approve"));
    }

    check_members_match(summary, members)?;

    let rejected: Vec<Uuid> = members
        .iter()
        .filter(|m| m.status == OvertimeStatus::Rejected)
        .map(|m| m.id)
        .collect();
    if !rejected.is_empty() {
        warn!(
            summary_id = %summary.id,
            rejected = rejected.len(),
            "summary approval aborted on rejected members"
        );
        return Err(EngineError::PartialState {
            summary_id: summary.id,
            message: format!(
                "{} member request(s) already rejected: {}",
                rejected.len(),
                rejected
                    .iter()
                    .map(Uuid::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        });
    }

    let mut cascaded = Vec::with_capacity(members.len());
    let mut grants = Vec::new();
    for member in members {
        let mut member = member.clone();
        if member.status != OvertimeStatus::Approved {
            finalize(&mut member, actor, note, settings, holidays, now);
            grants.push(grant_for(&member));
        }
        cascaded.push(member);
    }

    let mut approved = summary.clone();
    approved.status = OvertimeStatus::Approved;
    approved.final_approved_by = Some(actor.to_string());
    approved.final_approved_at = Some(now);
    approved.decision_note = note.map(str::to_string);

    info!(
        summary_id = %approved.id,
        actor,
        cascaded = grants.len(),
        "overtime summary approved"
    );

    Ok(SummaryOutcome {
        summary: approved,
        members: cascaded,
        grants,
    })
}

/// Rejects a summary. Legal from [`OvertimeStatus::Pending`] or
/// [`OvertimeStatus::Level1Approved`]. Member requests are not touched; a
/// batch rejection does not cascade.
pub fn reject_summary(
    summary: &OvertimeSummaryRequest,
    actor: &str,
    note: Option<&str>,
    now: DateTime<Utc>,
) -> EngineResult<OvertimeSummaryRequest> {
    if summary.status.is_terminal() {
        return Err(invalid_state(summary, "reject"));
    }

    let mut rejected = summary.clone();
    rejected.status = OvertimeStatus::Rejected;
    rejected.final_approved_by = Some(actor.to_string());
    rejected.final_approved_at = Some(now);
    rejected.decision_note = note.map(str::to_string);

    info!(summary_id = %rejected.id, actor, "overtime summary rejected");
    Ok(rejected)
}

/// The supplied member set must cover the summary's included ids exactly,
/// in any order.
fn check_members_match(
    summary: &OvertimeSummaryRequest,
    members: &[OvertimeRequest],
) -> EngineResult<()> {
    if members.len() != summary.included_request_ids.len() {
        return Err(EngineError::Validation {
            message: format!(
                "summary {} lists {} member(s) but {} were supplied",
                summary.id,
                summary.included_request_ids.len(),
                members.len()
            ),
        });
    }
    for id in &summary.included_request_ids {
        if !members.iter().any(|m| m.id == *id) {
            return Err(EngineError::Validation {
                message: format!("member request {id} was not supplied"),
            });
        }
    }
    Ok(())
}

fn invalid_state(summary: &OvertimeSummaryRequest, action: &str) -> EngineError {
    EngineError::InvalidState {
        entity: "overtime summary".to_string(),
        status: summary.status.to_string(),
        action: action.to_string(),
    }
}
