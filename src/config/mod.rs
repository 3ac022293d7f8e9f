//! Configuration provider for the attendance engine.
//!
//! Loads and validates the active work-settings snapshot and holiday
//! calendar. The engine never holds configuration in a process-wide
//! global; callers load a snapshot and thread it through every call.

mod loader;

pub use loader::ScheduleConfig;
