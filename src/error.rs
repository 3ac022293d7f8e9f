//! Error types for the attendance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure conditions the engine can surface.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the attendance engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// Geofence anomalies are deliberately *not* errors: a check-in outside the
/// fence is recorded and flagged, never rejected, because GPS noise near a
/// boundary would otherwise block legitimate attendance.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::InvalidTimezone {
///     timezone: "Mars/Olympus".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid or unknown timezone: Mars/Olympus");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The configured timezone is not a valid IANA zone name.
    #[error("Invalid or unknown timezone: {timezone}")]
    InvalidTimezone {
        /// The timezone string that failed to parse.
        timezone: String,
    },

    /// The work-hours configuration is inconsistent.
    #[error("Invalid work-hours configuration: {message}")]
    InvalidWorkHours {
        /// A description of what made the configuration invalid.
        message: String,
    },

    /// A workflow transition was attempted from an illegal state.
    ///
    /// The caller must re-fetch the current entity state; the transition is
    /// never retried with stale data.
    #[error("Cannot {action} {entity} in status '{status}'")]
    InvalidState {
        /// The kind of entity the transition targeted.
        entity: String,
        /// The status the entity was in when the transition was attempted.
        status: String,
        /// The transition that was attempted.
        action: String,
    },

    /// A submission was malformed (e.g. correction type and proposed times
    /// do not match).
    #[error("Validation failed: {message}")]
    Validation {
        /// A description of the validation failure.
        message: String,
    },

    /// A batch approval encountered members in conflicting states.
    ///
    /// Nothing is committed; the batch is all-or-nothing.
    #[error("Summary {summary_id} cannot be applied atomically: {message}")]
    PartialState {
        /// The id of the summary request.
        summary_id: Uuid,
        /// A description of the conflicting member states.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/work_settings.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/work_settings.yaml"
        );
    }

    #[test]
    fn test_invalid_timezone_displays_zone() {
        let error = EngineError::InvalidTimezone {
            timezone: "Not/AZone".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid or unknown timezone: Not/AZone");
    }

    #[test]
    fn test_invalid_state_displays_entity_status_action() {
        let error = EngineError::InvalidState {
            entity: "correction request".to_string(),
            status: "approved".to_string(),
            action: "decide".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot decide correction request in status 'approved'"
        );
    }

    #[test]
    fn test_partial_state_displays_summary_id() {
        let id = Uuid::new_v4();
        let error = EngineError::PartialState {
            summary_id: id,
            message: "1 member already rejected".to_string(),
        };
        assert!(error.to_string().contains(&id.to_string()));
        assert!(error.to_string().contains("already rejected"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_validation() -> EngineResult<()> {
            Err(EngineError::Validation {
                message: "bad input".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_validation()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
