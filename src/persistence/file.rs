use super::{PersistenceError, PersistenceResult};
use crate::{
    calendar::OffsetSource,
    config::LineupConfig,
    grid::{GridError, RawGrid},
    merge::MergedSchedule,
    schedule::DaySchedule,
};
use chrono::NaiveDate;
use serde::{Serialize, de::DeserializeOwned};
use std::fs;
use std::path::Path;
use tracing::debug;

fn io_error(path: &Path, source: std::io::Error) -> PersistenceError {
    PersistenceError::Io {
        path: path.display().to_string(),
        source,
    }
}

pub fn read_grid_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<RawGrid> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|err| io_error(path, err))?;
    let grid = RawGrid::parse(&raw);
    if grid.is_empty() {
        return Err(GridError::Empty.into());
    }
    debug!(path = %path.display(), rows = grid.len(), width = grid.width(), "parsed csv grid");
    Ok(grid)
}

/// Read one day's CSV export and rebuild its sets. `meta.source` is the
/// file name without its directory.
pub fn normalize_csv<P, S>(
    path: P,
    date: NaiveDate,
    day: &str,
    config: &LineupConfig,
    offsets: &S,
) -> PersistenceResult<DaySchedule>
where
    P: AsRef<Path>,
    S: OffsetSource + ?Sized,
{
    let path = path.as_ref();
    let grid = read_grid_from_csv(path)?;
    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(DaySchedule::build(&grid, day, source, date, config, offsets)?)
}

pub fn day_schedule_to_json_string(schedule: &DaySchedule) -> PersistenceResult<String> {
    Ok(serde_json::to_string_pretty(schedule)?)
}

pub fn save_day_schedule_to_json<P: AsRef<Path>>(
    schedule: &DaySchedule,
    path: P,
) -> PersistenceResult<()> {
    write_pretty_json(schedule, path.as_ref())
}

pub fn load_day_schedule_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<DaySchedule> {
    read_json(path.as_ref())
}

pub fn load_day_schedules<I, P>(paths: I) -> PersistenceResult<Vec<DaySchedule>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .map(|path| load_day_schedule_from_json(path))
        .collect()
}

pub fn save_merged_schedule_to_json<P: AsRef<Path>>(
    merged: &MergedSchedule,
    path: P,
) -> PersistenceResult<()> {
    write_pretty_json(merged, path.as_ref())
}

pub fn load_merged_schedule_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<MergedSchedule> {
    read_json(path.as_ref())
}

// The document is rendered in full before the file is created, so a failed
// run never leaves a truncated file behind.
fn write_pretty_json<T: Serialize>(value: &T, path: &Path) -> PersistenceResult<()> {
    let mut body = serde_json::to_string_pretty(value)?;
    body.push('\n');
    fs::write(path, body).map_err(|err| io_error(path, err))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> PersistenceResult<T> {
    let raw = fs::read_to_string(path).map_err(|err| io_error(path, err))?;
    serde_json::from_str(&raw).map_err(|err| {
        PersistenceError::InvalidData(format!("{}: {err}", path.display()))
    })
}
