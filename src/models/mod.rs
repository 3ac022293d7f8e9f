//! Core data models for the attendance engine.
//!
//! This module contains all the domain records used throughout the engine.

mod attendance;
mod correction;
mod overtime;
mod settings;

pub use attendance::{AttendanceEvent, LatenessStatus};
pub use correction::{CorrectionRequest, CorrectionStatus, CorrectionType};
pub use overtime::{OvertimeRequest, OvertimeStatus, OvertimeSummaryRequest, RequestPeriod};
pub use settings::{
    Coordinate, GeofenceConfig, Holiday, HolidayCalendar, WorkSettings, weekday_number,
};
