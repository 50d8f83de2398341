use crate::calendar::{DEFAULT_TIMEZONE, TimezoneError, TzDatabase};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error(transparent)]
    Timezone(#[from] TimezoneError),
}

/// Layout of one day's grid: when the first row starts, how long each row
/// lasts, which zone the wall clock is in, and which header labels are not
/// stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineupConfig {
    pub start_hour: u32,
    pub start_minute: u32,
    pub slot_minutes: u32,
    #[serde(alias = "tz")]
    pub timezone: String,
    pub ignored_headers: Vec<String>,
}

impl Default for LineupConfig {
    fn default() -> Self {
        Self {
            start_hour: 13,
            start_minute: 0,
            slot_minutes: 15,
            timezone: DEFAULT_TIMEZONE.to_string(),
            ignored_headers: Vec::new(),
        }
    }
}

impl LineupConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Reject a grid clock that cannot produce increasing row times.
    pub fn validate_clock(&self) -> Result<(), ConfigError> {
        if self.slot_minutes == 0 {
            return Err(ConfigError::Invalid(
                "slotMinutes must be greater than zero".into(),
            ));
        }
        if self.start_hour > 23 {
            return Err(ConfigError::Invalid(format!(
                "startHour {} is not between 0 and 23",
                self.start_hour
            )));
        }
        if self.start_minute > 59 {
            return Err(ConfigError::Invalid(format!(
                "startMinute {} is not between 0 and 59",
                self.start_minute
            )));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_clock()?;
        TzDatabase::resolve(&self.timezone)?;
        Ok(())
    }

    pub fn start_minutes(&self) -> i64 {
        i64::from(self.start_hour) * 60 + i64::from(self.start_minute)
    }

    /// `HH:MM` label of the first grid row.
    pub fn start_local(&self) -> String {
        format!("{:02}:{:02}", self.start_hour, self.start_minute)
    }

    pub fn is_ignored(&self, label: &str) -> bool {
        self.ignored_headers.iter().any(|h| h == label)
    }
}
