use crate::{
    calendar::TimezoneError, config::ConfigError, grid::GridError, schedule::ScheduleError,
};
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid input: {0}")]
    Grid(#[from] GridError),
    #[error("timezone error: {0}")]
    Timezone(#[from] TimezoneError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl From<ScheduleError> for PersistenceError {
    fn from(value: ScheduleError) -> Self {
        match value {
            ScheduleError::Grid(err) => Self::Grid(err),
            ScheduleError::Timezone(err) => Self::Timezone(err),
            ScheduleError::Config(err) => Self::Config(err),
        }
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub mod file;

pub use file::{
    day_schedule_to_json_string, load_day_schedule_from_json, load_day_schedules,
    load_merged_schedule_from_json, normalize_csv, read_grid_from_csv, save_day_schedule_to_json,
    save_merged_schedule_to_json,
};
