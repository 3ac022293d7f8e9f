//! Pure evaluation logic for attendance events.
//!
//! This module contains the computational side of the engine: great-circle
//! distance and geofence containment, day-schedule resolution with holiday
//! and Friday rules, and the check-in/check-out evaluators that turn raw
//! events into lateness verdicts, worked minutes, and provisional overtime.

mod check_in;
mod check_out;
mod geo;
mod schedule;

pub use check_in::{CheckInAssessment, evaluate_check_in};
pub use check_out::{CheckOutAssessment, evaluate_check_out};
pub use geo::{EARTH_RADIUS_METERS, distance_meters, is_within_geofence};
pub use schedule::{DaySchedule, required_minutes, resolve_day};
