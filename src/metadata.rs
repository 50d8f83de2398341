use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Provenance and shape of a normalized day, stored next to its sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayMetadata {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub start_local: String,
    pub slot_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    pub headers: Vec<String>,
    pub stages: Vec<String>,
    pub row_count: usize,
    pub set_count: usize,
}
