//! Overtime request and overtime summary models.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of an overtime request or summary.
///
/// Two-stage flow: `Pending -> Level1Approved -> Approved`, with `Rejected`
/// reachable from either non-terminal state. `Approved` and `Rejected` are
/// terminal. Organizations with single-level review go straight from
/// `Pending` to `Approved` under [`crate::workflow::ApprovalPolicy::SingleLevel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeStatus {
    /// Submitted, awaiting level-1 review.
    Pending,
    /// Passed level-1 review, awaiting final review.
    Level1Approved,
    /// Fully approved; the overtime amount has been computed.
    Approved,
    /// Rejected at either review stage.
    Rejected,
}

impl OvertimeStatus {
    /// Returns true if the status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OvertimeStatus::Approved | OvertimeStatus::Rejected)
    }
}

impl std::fmt::Display for OvertimeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OvertimeStatus::Pending => write!(f, "pending"),
            OvertimeStatus::Level1Approved => write!(f, "level1_approved"),
            OvertimeStatus::Approved => write!(f, "approved"),
            OvertimeStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// An employee-submitted request for payable overtime on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeRequest {
    /// Unique identifier of the request.
    pub id: Uuid,
    /// The employee requesting overtime pay.
    pub employee_id: String,
    /// The date the overtime was (or will be) worked, in the work timezone.
    pub date_requested: NaiveDate,
    /// Hours of overtime claimed.
    pub overtime_hours: Decimal,
    /// Description of the work performed.
    pub work_description: String,
    /// Current lifecycle status.
    pub status: OvertimeStatus,
    /// Identity of the level-1 approver.
    pub level1_approved_by: Option<String>,
    /// When level-1 approval happened.
    pub level1_approved_at: Option<DateTime<Utc>>,
    /// Identity of the final approver (or rejecter).
    pub final_approved_by: Option<String>,
    /// When the final decision happened.
    pub final_approved_at: Option<DateTime<Utc>>,
    /// The decision note recorded with the most recent transition.
    pub decision_note: Option<String>,
    /// Payable amount; zero until the request is approved.
    pub overtime_amount: Decimal,
}

/// A year-month period an overtime summary covers.
///
/// # Example
///
/// ```
/// use attendance_engine::models::RequestPeriod;
/// use chrono::NaiveDate;
///
/// let period = RequestPeriod { year: 2026, month: 3 };
/// assert_eq!(period.to_string(), "2026-03");
/// assert!(period.contains(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()));
/// assert!(!period.contains(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestPeriod {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1 through 12.
    pub month: u32,
}

impl RequestPeriod {
    /// Returns true if the date falls inside this year-month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for RequestPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A batch of overtime requests for one period, approved or rejected as a
/// unit.
///
/// A summary moves through the same statuses as an individual request, but
/// its final approval cascades to every member atomically; see
/// [`crate::workflow::approve_summary_final`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeSummaryRequest {
    /// Unique identifier of the summary.
    pub id: Uuid,
    /// The year-month the summary covers.
    pub request_period: RequestPeriod,
    /// Ids of the member overtime requests, in submission order.
    pub included_request_ids: Vec<Uuid>,
    /// Current lifecycle status of the batch.
    pub status: OvertimeStatus,
    /// Identity of the level-1 approver.
    pub level1_approved_by: Option<String>,
    /// When level-1 approval happened.
    pub level1_approved_at: Option<DateTime<Utc>>,
    /// Identity of the final approver (or rejecter).
    pub final_approved_by: Option<String>,
    /// When the final decision happened.
    pub final_approved_at: Option<DateTime<Utc>>,
    /// The decision note recorded with the most recent transition.
    pub decision_note: Option<String>,
}
