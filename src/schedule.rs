use crate::{
    calculations::{
        block_scan::BlockScan,
        row_times::{RowClock, RowTime},
        stages::{StageColumn, detect_stage_columns},
    },
    calendar::{OffsetSource, TimezoneError},
    config::{ConfigError, LineupConfig},
    grid::{GridError, RawGrid},
    metadata::DayMetadata,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Timezone(#[from] TimezoneError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// One artist's block on one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceSet {
    pub stage: String,
    pub artist: String,
    #[serde(rename = "startISO", with = "iso_millis")]
    pub start: DateTime<Utc>,
    #[serde(rename = "endISO", with = "iso_millis")]
    pub end: DateTime<Utc>,
}

/// Sets of a single day, ordered by start instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: String,
    pub meta: DayMetadata,
    pub schedule: Vec<PerformanceSet>,
}

/// Everything the block scan learned about one grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstruction {
    pub headers: Vec<String>,
    pub stages: Vec<StageColumn>,
    pub row_times: Vec<RowTime>,
    pub sets: Vec<PerformanceSet>,
}

impl Reconstruction {
    pub fn stage_names(&self) -> Vec<String> {
        self.stages.iter().map(|s| s.name.clone()).collect()
    }
}

/// Rebuild the sets of one day from its grid.
///
/// Stages are scanned left to right and their sets concatenated, then
/// stably sorted by start instant, so sets starting together keep column
/// order.
pub fn reconstruct<S>(
    grid: &RawGrid,
    date: NaiveDate,
    config: &LineupConfig,
    offsets: &S,
) -> Result<Reconstruction, ScheduleError>
where
    S: OffsetSource + ?Sized,
{
    config.validate_clock()?;
    let (headers, rows) = grid.split_header()?;
    let stages = detect_stage_columns(headers, &config.ignored_headers);

    let clock = RowClock::new(offsets, config, date);
    let row_times = clock.row_times(rows.len())?;
    let scan = BlockScan::new(rows, &row_times, clock.end_of_day()?);

    let mut sets: Vec<PerformanceSet> = stages.iter().flat_map(|s| scan.execute(s)).collect();
    sets.sort_by_key(|set| set.start);

    let stage_names: Vec<&str> = stages.iter().map(|s| s.name.as_str()).collect();
    debug!(headers = ?headers, "detected headers");
    debug!(stages = ?stage_names, "detected stages");
    debug!(rows = row_times.len(), sets = sets.len(), "reconstructed day");
    if !row_times.is_empty() {
        let first: Vec<String> = row_times.iter().take(5).map(RowTime::label).collect();
        debug!("first {} times: {}", first.len(), first.join(", "));
    }

    Ok(Reconstruction {
        headers: headers.to_vec(),
        stages,
        row_times,
        sets,
    })
}

impl DaySchedule {
    pub fn from_reconstruction(
        day: impl Into<String>,
        source: impl Into<String>,
        date: NaiveDate,
        config: &LineupConfig,
        reconstruction: Reconstruction,
    ) -> Self {
        let stages = reconstruction.stage_names();
        let meta = DayMetadata {
            source: source.into(),
            date: Some(date),
            start_local: config.start_local(),
            slot_minutes: config.slot_minutes,
            timezone: Some(config.timezone.clone()),
            headers: reconstruction.headers,
            stages,
            row_count: reconstruction.row_times.len(),
            set_count: reconstruction.sets.len(),
        };
        Self {
            day: day.into(),
            meta,
            schedule: reconstruction.sets,
        }
    }

    pub fn build<S>(
        grid: &RawGrid,
        day: impl Into<String>,
        source: impl Into<String>,
        date: NaiveDate,
        config: &LineupConfig,
        offsets: &S,
    ) -> Result<Self, ScheduleError>
    where
        S: OffsetSource + ?Sized,
    {
        let reconstruction = reconstruct(grid, date, config, offsets)?;
        Ok(Self::from_reconstruction(
            day,
            source,
            date,
            config,
            reconstruction,
        ))
    }

    pub fn sets_for_stage<'a>(&'a self, stage: &'a str) -> impl Iterator<Item = &'a PerformanceSet> {
        self.schedule.iter().filter(move |set| set.stage == stage)
    }
}

mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
