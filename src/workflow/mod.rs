//! Approval workflows for corrections and overtime.
//!
//! Each transition is a pure function from the current entity value (plus
//! the configuration snapshot) to the next one; illegal transitions fail
//! with [`crate::error::EngineError::InvalidState`]. The caller serializes
//! concurrent transitions on the same entity, typically with a database
//! transaction or an optimistic version check, and performs every write.

mod correction;
mod overtime;
mod summary;

pub use correction::{CorrectionOutcome, decide_correction, submit_correction};
pub use overtime::{
    ApprovalPolicy, MAX_OVERTIME_HOURS, OvertimeGrant, apply_overtime_grant, approve_final,
    approve_level1, overtime_rate_for, reject_overtime, submit_overtime,
};
pub use summary::{
    SummaryOutcome, approve_summary_final, approve_summary_level1, reject_summary, submit_summary,
};
