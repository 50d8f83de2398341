use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

pub const DEFAULT_TIMEZONE: &str = "America/New_York";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimezoneError {
    #[error("unrecognized timezone '{0}'")]
    UnknownZone(String),
    #[error("could not determine the UTC offset of {zone} at {local}")]
    OffsetUnavailable { zone: String, local: NaiveDateTime },
    #[error("local time {minutes} minutes after midnight on {date} is out of range")]
    OutOfRange { date: NaiveDate, minutes: i64 },
}

/// Source of UTC offsets for a named zone.
///
/// Reconstruction only needs this one question answered, so tests can swap
/// the IANA database for a fixed offset.
pub trait OffsetSource {
    /// Offset east of UTC, in minutes, that `zone` observes around the local
    /// wall clock `local`.
    fn offset_minutes_for(&self, local: NaiveDateTime, zone: &str) -> Result<i32, TimezoneError>;
}

/// Offsets from the IANA timezone database bundled by `chrono-tz`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TzDatabase;

impl TzDatabase {
    pub fn resolve(zone: &str) -> Result<Tz, TimezoneError> {
        zone.parse::<Tz>()
            .map_err(|_| TimezoneError::UnknownZone(zone.to_string()))
    }
}

impl OffsetSource for TzDatabase {
    fn offset_minutes_for(&self, local: NaiveDateTime, zone: &str) -> Result<i32, TimezoneError> {
        let tz = Self::resolve(zone)?;
        // Reading the wall clock as a UTC instant picks a single offset even
        // inside the repeated or skipped hour of a transition.
        let seconds = tz.offset_from_utc_datetime(&local).fix().local_minus_utc();
        if seconds % 60 != 0 {
            return Err(TimezoneError::OffsetUnavailable {
                zone: zone.to_string(),
                local,
            });
        }
        Ok(seconds / 60)
    }
}

/// The same offset for every zone and date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedOffsetSource {
    minutes: i32,
}

impl FixedOffsetSource {
    pub fn new(minutes: i32) -> Self {
        Self { minutes }
    }

    pub fn utc() -> Self {
        Self::new(0)
    }
}

impl OffsetSource for FixedOffsetSource {
    fn offset_minutes_for(&self, _local: NaiveDateTime, _zone: &str) -> Result<i32, TimezoneError> {
        Ok(self.minutes)
    }
}

/// Wall clock `minutes` after local midnight of `date`. Values past 24 hours
/// roll into the following days.
pub fn local_wall_clock(date: NaiveDate, minutes: i64) -> Result<NaiveDateTime, TimezoneError> {
    date.and_time(NaiveTime::MIN)
        .checked_add_signed(Duration::minutes(minutes))
        .ok_or(TimezoneError::OutOfRange { date, minutes })
}

/// Convert a local wall clock in `zone` to the UTC instant it names.
pub fn local_to_instant<S>(
    source: &S,
    local: NaiveDateTime,
    zone: &str,
) -> Result<DateTime<Utc>, TimezoneError>
where
    S: OffsetSource + ?Sized,
{
    let offset = source.offset_minutes_for(local, zone)?;
    local
        .checked_sub_signed(Duration::minutes(i64::from(offset)))
        .map(|utc| utc.and_utc())
        .ok_or(TimezoneError::OffsetUnavailable {
            zone: zone.to_string(),
            local,
        })
}

/// UTC instant of `hour:minute` on `date` in `zone`.
pub fn to_instant<S>(
    source: &S,
    date: NaiveDate,
    hour: u32,
    minute: u32,
    zone: &str,
) -> Result<DateTime<Utc>, TimezoneError>
where
    S: OffsetSource + ?Sized,
{
    let local = local_wall_clock(date, i64::from(hour) * 60 + i64::from(minute))?;
    local_to_instant(source, local, zone)
}

/// Zero padded 24-hour `HH:MM` of `instant` as seen in `zone`.
pub fn format_local_hm(instant: DateTime<Utc>, zone: &str) -> Result<String, TimezoneError> {
    let tz = TzDatabase::resolve(zone)?;
    Ok(instant.with_timezone(&tz).format("%H:%M").to_string())
}

pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}
