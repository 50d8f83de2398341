use crate::{
    calendar::{self, DEFAULT_TIMEZONE, TimezoneError, weekday_name},
    schedule::DaySchedule,
};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};
use std::fmt;
use tracing::debug;

/// A set as the lineup page shows it: local `HH:MM` start and end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotEntry {
    pub artist: String,
    pub start: String,
    pub end: String,
}

/// Stage name to set list, kept in the order stages were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageLineup {
    stages: Vec<(String, Vec<SlotEntry>)>,
}

impl StageLineup {
    pub fn get(&self, stage: &str) -> Option<&[SlotEntry]> {
        self.stages
            .iter()
            .find(|(name, _)| name == stage)
            .map(|(_, entries)| entries.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SlotEntry])> {
        self.stages
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn push(&mut self, stage: &str, entry: SlotEntry) {
        match self.stages.iter_mut().find(|(name, _)| name == stage) {
            Some((_, entries)) => entries.push(entry),
            None => self.stages.push((stage.to_string(), vec![entry])),
        }
    }

    fn sort_by_start(&mut self) {
        for (_, entries) in &mut self.stages {
            entries.sort_by(|a, b| a.start.cmp(&b.start));
        }
    }
}

impl Serialize for StageLineup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.stages.len()))?;
        for (name, entries) in &self.stages {
            map.serialize_entry(name, entries)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StageLineup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StageLineupVisitor;

        impl<'de> Visitor<'de> for StageLineupVisitor {
            type Value = StageLineup;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of stage names to set lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<StageLineup, A::Error> {
                let mut stages = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, entries)) = access.next_entry::<String, Vec<SlotEntry>>()? {
                    stages.push((name, entries));
                }
                Ok(StageLineup { stages })
            }
        }

        deserializer.deserialize_map(StageLineupVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLineup {
    pub day: String,
    pub stages: StageLineup,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedSchedule {
    pub schedule: Vec<DayLineup>,
}

/// Reshapes normalized days into the lineup page's multi-day document.
#[derive(Debug, Clone)]
pub struct ScheduleMerger {
    fallback_timezone: String,
}

impl Default for ScheduleMerger {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE)
    }
}

impl ScheduleMerger {
    /// `fallback_timezone` formats days whose metadata does not name a zone.
    pub fn new(fallback_timezone: impl Into<String>) -> Self {
        Self {
            fallback_timezone: fallback_timezone.into(),
        }
    }

    pub fn day_lineup(&self, day: &DaySchedule) -> Result<DayLineup, TimezoneError> {
        let zone = day
            .meta
            .timezone
            .as_deref()
            .unwrap_or(&self.fallback_timezone);
        let label = match day.meta.date {
            Some(date) => weekday_name(date),
            None => day.day.clone(),
        };

        let mut stages = StageLineup::default();
        for set in &day.schedule {
            stages.push(
                &set.stage,
                SlotEntry {
                    artist: set.artist.clone(),
                    start: calendar::format_local_hm(set.start, zone)?,
                    end: calendar::format_local_hm(set.end, zone)?,
                },
            );
        }
        stages.sort_by_start();

        debug!(day = %label, stages = stages.len(), sets = day.schedule.len(), "merged day");
        Ok(DayLineup { day: label, stages })
    }

    /// Days come out in the order given.
    pub fn merge<'a, I>(&self, days: I) -> Result<MergedSchedule, TimezoneError>
    where
        I: IntoIterator<Item = &'a DaySchedule>,
    {
        let schedule = days
            .into_iter()
            .map(|day| self.day_lineup(day))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MergedSchedule { schedule })
    }
}
