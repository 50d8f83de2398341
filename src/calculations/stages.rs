/// A grid column that holds one stage's sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageColumn {
    pub index: usize,
    pub name: String,
}

impl StageColumn {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

/// Columns whose header label is non-empty and not ignored.
///
/// When no column qualifies every header column becomes a stage, and empty
/// labels are named `Stage N` after their 1-based column position.
pub fn detect_stage_columns(headers: &[String], ignored: &[String]) -> Vec<StageColumn> {
    let detected: Vec<StageColumn> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| !name.is_empty() && !ignored.iter().any(|i| i == *name))
        .map(|(index, name)| StageColumn::new(index, name.as_str()))
        .collect();

    if !detected.is_empty() {
        return detected;
    }

    headers
        .iter()
        .enumerate()
        .map(|(index, name)| {
            if name.is_empty() {
                StageColumn::new(index, format!("Stage {}", index + 1))
            } else {
                StageColumn::new(index, name.as_str())
            }
        })
        .collect()
}
