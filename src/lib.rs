pub mod calculations;
pub mod calendar;
pub mod config;
pub mod grid;
#[cfg(feature = "cli")]
pub mod logging;
pub mod merge;
pub mod metadata;
pub mod persistence;
pub mod schedule;

pub use calculations::row_times::RowTime;
pub use calculations::stages::{StageColumn, detect_stage_columns};
pub use calendar::{
    DEFAULT_TIMEZONE, FixedOffsetSource, OffsetSource, TimezoneError, TzDatabase, format_local_hm,
    to_instant, weekday_name,
};
pub use config::{ConfigError, LineupConfig};
pub use grid::{GridError, RawGrid};
pub use merge::{DayLineup, MergedSchedule, ScheduleMerger, SlotEntry, StageLineup};
pub use metadata::DayMetadata;
pub use persistence::{
    PersistenceError, PersistenceResult, day_schedule_to_json_string, load_day_schedule_from_json,
    load_day_schedules, load_merged_schedule_from_json, normalize_csv, read_grid_from_csv,
    save_day_schedule_to_json, save_merged_schedule_to_json,
};
pub use schedule::{DaySchedule, PerformanceSet, Reconstruction, ScheduleError, reconstruct};
