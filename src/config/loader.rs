//! Configuration loading and validation.
//!
//! This module provides the [`ScheduleConfig`] type, the "configuration
//! provider" side of the engine: it loads the active [`WorkSettings`] and
//! the holiday calendar from YAML files and validates them up front, so the
//! evaluators never see a half-formed configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{Holiday, HolidayCalendar, WorkSettings};

/// Shape of `holidays.yaml`.
#[derive(Debug, Deserialize)]
struct HolidaysFile {
    holidays: Vec<Holiday>,
}

/// A validated configuration snapshot: work settings plus holiday calendar.
///
/// # Directory structure
///
/// ```text
/// config/
/// ├── work_settings.yaml   # timezone, work pattern, hours, rates
/// └── holidays.yaml        # holiday calendar
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ScheduleConfig;
///
/// let config = ScheduleConfig::load("./config")?;
/// let settings = config.settings();
/// assert!(!settings.timezone.is_empty());
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    settings: WorkSettings,
    holidays: HolidayCalendar,
}

impl ScheduleConfig {
    /// Loads and validates configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] when a required file is missing.
    /// - [`EngineError::ConfigParseError`] on invalid YAML.
    /// - [`EngineError::InvalidTimezone`] / [`EngineError::InvalidWorkHours`]
    ///   when the settings are internally inconsistent. Configuration is
    ///   never silently defaulted.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<WorkSettings>(&path.join("work_settings.yaml"))?;
        let holidays_file = Self::load_yaml::<HolidaysFile>(&path.join("holidays.yaml"))?;

        let config = Self::from_parts(settings, holidays_file.holidays)?;
        info!(
            timezone = %config.settings.timezone,
            workdays = config.settings.workdays.len(),
            holidays = config.holidays.len(),
            "schedule configuration loaded"
        );
        Ok(config)
    }

    /// Builds a validated configuration from already-deserialized parts.
    ///
    /// Useful for callers that source configuration from a database rather
    /// than files; the same validation applies.
    pub fn from_parts(
        settings: WorkSettings,
        holidays: Vec<Holiday>,
    ) -> EngineResult<Self> {
        validate(&settings)?;
        Ok(Self {
            settings,
            holidays: HolidayCalendar::new(holidays),
        })
    }

    /// The validated work settings snapshot.
    pub fn settings(&self) -> &WorkSettings {
        &self.settings
    }

    /// The holiday calendar.
    pub fn holidays(&self) -> &HolidayCalendar {
        &self.holidays
    }

    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path.display().to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|err| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }
}

/// Checks the settings for internal consistency.
fn validate(settings: &WorkSettings) -> EngineResult<()> {
    settings.tz()?;

    if let Some(day) = settings.workdays.iter().find(|d| **d > 6) {
        return Err(EngineError::InvalidWorkHours {
            message: format!("workday number {day} is out of range 0-6"),
        });
    }
    if settings.workdays.is_empty() {
        return Err(EngineError::InvalidWorkHours {
            message: "no workdays configured".to_string(),
        });
    }
    if settings.end_time <= settings.start_time {
        return Err(EngineError::InvalidWorkHours {
            message: format!(
                "end time {} is not after start time {}",
                settings.end_time, settings.start_time
            ),
        });
    }
    if let (Some(start), Some(end)) = (settings.friday_start_time, settings.friday_end_time) {
        if end <= start {
            return Err(EngineError::InvalidWorkHours {
                message: format!("Friday end time {end} is not after Friday start time {start}"),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn settings() -> WorkSettings {
        WorkSettings::standard_week("Asia/Jakarta", time(9, 0), time(17, 0), 10)
    }

    #[test]
    fn test_from_parts_accepts_valid_settings() {
        let config = ScheduleConfig::from_parts(
            settings(),
            vec![Holiday {
                date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                note: "New Year's Day".to_string(),
            }],
        )
        .unwrap();
        assert!(config.holidays().contains(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
        assert_eq!(config.settings().grace_minutes, 10);
    }

    #[test]
    fn test_from_parts_rejects_bad_timezone() {
        let mut bad = settings();
        bad.timezone = "Jakarta".to_string();
        assert!(matches!(
            ScheduleConfig::from_parts(bad, vec![]),
            Err(EngineError::InvalidTimezone { .. })
        ));
    }

    #[test]
    fn test_from_parts_rejects_inverted_hours() {
        let mut bad = settings();
        bad.end_time = time(8, 0);
        assert!(matches!(
            ScheduleConfig::from_parts(bad, vec![]),
            Err(EngineError::InvalidWorkHours { .. })
        ));
    }

    #[test]
    fn test_from_parts_rejects_inverted_friday_hours() {
        let mut bad = settings();
        bad.friday_start_time = Some(time(13, 0));
        bad.friday_end_time = Some(time(11, 0));
        assert!(matches!(
            ScheduleConfig::from_parts(bad, vec![]),
            Err(EngineError::InvalidWorkHours { .. })
        ));
    }

    #[test]
    fn test_from_parts_rejects_out_of_range_workday() {
        let mut bad = settings();
        bad.workdays.insert(7);
        assert!(matches!(
            ScheduleConfig::from_parts(bad, vec![]),
            Err(EngineError::InvalidWorkHours { .. })
        ));
    }

    #[test]
    fn test_from_parts_rejects_empty_workdays() {
        let mut bad = settings();
        bad.workdays.clear();
        assert!(matches!(
            ScheduleConfig::from_parts(bad, vec![]),
            Err(EngineError::InvalidWorkHours { .. })
        ));
    }

    #[test]
    fn test_load_missing_directory_is_config_not_found() {
        let result = ScheduleConfig::load("/definitely/not/a/config/dir");
        assert!(matches!(result, Err(EngineError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_settings_parse_from_yaml() {
        let yaml = r#"
timezone: "Asia/Jakarta"
workdays: [0, 1, 2, 3, 4]
start_time: "09:00:00"
end_time: "17:00:00"
friday_end_time: "12:00:00"
grace_minutes: 10
overtime_rate_workday: "0.5"
overtime_rate_holiday: "0.75"
hourly_base_wage: "20"
"#;
        let parsed: WorkSettings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed.friday_end_time, Some(time(12, 0)));
        assert_eq!(parsed.friday_start_time, None);
        assert!(ScheduleConfig::from_parts(parsed, vec![]).is_ok());
    }
}
