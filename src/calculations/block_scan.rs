use super::{row_times::RowTime, stages::StageColumn};
use crate::schedule::PerformanceSet;
use chrono::{DateTime, Utc};
use tracing::{trace, warn};

/// Progress of the scan down one stage column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockState<'a> {
    Idle,
    Open { artist: &'a str, start: &'a RowTime },
}

/// Single pass over a stage column turning runs of identical artist cells
/// into sets.
pub struct BlockScan<'a> {
    rows: &'a [Vec<String>],
    row_times: &'a [RowTime],
    end_of_day: DateTime<Utc>,
}

impl<'a> BlockScan<'a> {
    /// `row_times[i]` must describe `rows[i]`.
    pub fn new(rows: &'a [Vec<String>], row_times: &'a [RowTime], end_of_day: DateTime<Utc>) -> Self {
        Self {
            rows,
            row_times,
            end_of_day,
        }
    }

    pub fn execute(&self, stage: &StageColumn) -> Vec<PerformanceSet> {
        let mut sets = Vec::new();
        let mut state = BlockState::Idle;

        for (cells, time) in self.rows.iter().zip(self.row_times) {
            let cell = cells.get(stage.index).map(String::as_str).unwrap_or("");
            state = match state {
                BlockState::Idle if cell.is_empty() => BlockState::Idle,
                BlockState::Idle => BlockState::Open {
                    artist: cell,
                    start: time,
                },
                BlockState::Open { artist, start } if artist == cell => {
                    BlockState::Open { artist, start }
                }
                BlockState::Open { artist, start } => {
                    trace!(stage = %stage.name, artist, start_row = start.row, end_row = time.row, "closing set");
                    sets.push(set_for(stage, artist, start.instant, time.instant));
                    if cell.is_empty() {
                        BlockState::Idle
                    } else {
                        BlockState::Open {
                            artist: cell,
                            start: time,
                        }
                    }
                }
            };
        }

        if let BlockState::Open { artist, start } = state {
            trace!(stage = %stage.name, artist, start_row = start.row, "set runs past the last row");
            sets.push(set_for(stage, artist, start.instant, self.trailing_end(stage, artist, start)));
        }

        sets
    }

    /// End of a set still open after the last row: 23:59 on the session date,
    /// or on the set's own local date once the grid has crossed midnight.
    fn trailing_end(&self, stage: &StageColumn, artist: &str, start: &RowTime) -> DateTime<Utc> {
        if self.end_of_day > start.instant {
            return self.end_of_day;
        }
        warn!(
            stage = %stage.name,
            artist,
            start = %start.local,
            "set starts after 23:59 of the session date; ending it at 23:59 of its own date"
        );
        start.day_end
    }
}

fn set_for(
    stage: &StageColumn,
    artist: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> PerformanceSet {
    PerformanceSet {
        stage: stage.name.clone(),
        artist: artist.to_string(),
        start,
        end,
    }
}
