//! Attendance-correction request model.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of amendment a correction request proposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionType {
    /// Supply a check-in time for a date that has none.
    MissingCheckIn,
    /// Supply a check-out time for a date that has none.
    MissingCheckOut,
    /// Override one or both recorded times.
    Edit,
}

impl std::fmt::Display for CorrectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrectionType::MissingCheckIn => write!(f, "missing_check_in"),
            CorrectionType::MissingCheckOut => write!(f, "missing_check_out"),
            CorrectionType::Edit => write!(f, "edit"),
        }
    }
}

/// Lifecycle status of a correction request.
///
/// `Pending` is the only non-terminal status; a decided request is immutable
/// apart from its audit fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionStatus {
    /// Submitted, awaiting a reviewer decision.
    Pending,
    /// Approved; the proposed times were applied to the attendance record.
    Approved,
    /// Rejected; the attendance record was left untouched.
    Rejected,
}

impl std::fmt::Display for CorrectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrectionStatus::Pending => write!(f, "pending"),
            CorrectionStatus::Approved => write!(f, "approved"),
            CorrectionStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// An employee-submitted request to amend a missing or incorrect
/// check-in/check-out time.
///
/// Proposed times are wall-clock times in the work timezone; they are
/// converted to UTC only when the request is approved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionRequest {
    /// Unique identifier of the request.
    pub id: Uuid,
    /// The employee whose attendance the request amends.
    pub employee_id: String,
    /// The attendance date the request targets, in the work timezone.
    pub date_local: NaiveDate,
    /// The kind of amendment proposed.
    pub correction_type: CorrectionType,
    /// Proposed check-in wall-clock time, when the type calls for one.
    pub proposed_check_in_local: Option<NaiveDateTime>,
    /// Proposed check-out wall-clock time, when the type calls for one.
    pub proposed_check_out_local: Option<NaiveDateTime>,
    /// The employee's stated reason for the amendment.
    pub reason: String,
    /// Current lifecycle status.
    pub status: CorrectionStatus,
    /// Identity of the reviewer who decided the request.
    pub reviewed_by: Option<String>,
    /// When the request was decided.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// The reviewer's note accompanying the decision.
    pub decision_note: Option<String>,
}
