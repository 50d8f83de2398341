use crate::{
    calendar::{self, OffsetSource, TimezoneError},
    config::LineupConfig,
};
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, Utc};

/// Clock time of one data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowTime {
    pub row: usize,
    /// Hours since local midnight of the session date; may exceed 23.
    pub hour: i64,
    pub minute: i64,
    pub local: NaiveDateTime,
    pub instant: DateTime<Utc>,
    /// First 23:59 local on or after this row's own date that lies after
    /// `instant`.
    pub day_end: DateTime<Utc>,
}

impl RowTime {
    pub fn label(&self) -> String {
        format!("{}:{:02}", self.hour, self.minute)
    }
}

pub struct RowClock<'a, S: OffsetSource + ?Sized> {
    offsets: &'a S,
    config: &'a LineupConfig,
    date: NaiveDate,
}

impl<'a, S: OffsetSource + ?Sized> RowClock<'a, S> {
    pub fn new(offsets: &'a S, config: &'a LineupConfig, date: NaiveDate) -> Self {
        Self {
            offsets,
            config,
            date,
        }
    }

    pub fn row_time(&self, row: usize) -> Result<RowTime, TimezoneError> {
        let total = self.config.start_minutes() + row as i64 * i64::from(self.config.slot_minutes);
        let local = calendar::local_wall_clock(self.date, total)?;
        let instant = calendar::local_to_instant(self.offsets, local, &self.config.timezone)?;
        let mut day_end = self.end_of_day_on(local.date())?;
        if day_end <= instant {
            let next = local
                .date()
                .checked_add_days(Days::new(1))
                .ok_or(TimezoneError::OutOfRange {
                    date: self.date,
                    minutes: total,
                })?;
            day_end = self.end_of_day_on(next)?;
        }
        Ok(RowTime {
            row,
            hour: total.div_euclid(60),
            minute: total.rem_euclid(60),
            local,
            instant,
            day_end,
        })
    }

    /// Times for rows `0..count`. Every row counts, blank or not.
    pub fn row_times(&self, count: usize) -> Result<Vec<RowTime>, TimezoneError> {
        (0..count).map(|row| self.row_time(row)).collect()
    }

    /// 23:59 local on the session date, the end given to a set still running
    /// when the grid runs out of rows.
    pub fn end_of_day(&self) -> Result<DateTime<Utc>, TimezoneError> {
        self.end_of_day_on(self.date)
    }

    pub fn end_of_day_on(&self, date: NaiveDate) -> Result<DateTime<Utc>, TimezoneError> {
        calendar::to_instant(self.offsets, date, 23, 59, &self.config.timezone)
    }
}
