use thiserror::Error;
use tracing::warn;

const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("CSV appears empty")]
    Empty,
    #[error("no header row found")]
    MissingHeader,
}

/// Rectangular table of trimmed text cells, as exported from a spreadsheet.
///
/// Every row has exactly [`RawGrid::width`] cells. Blank rows in the middle of
/// the grid are kept because each one still stands for a time slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawGrid {
    rows: Vec<Vec<String>>,
    width: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    Unquoted,
    Quoted,
}

impl RawGrid {
    /// Tokenize comma separated text into a grid.
    ///
    /// Quoted fields may contain commas and newlines, and `""` inside quotes
    /// is a literal quote. Trailing rows that are entirely empty are dropped.
    /// Input that ends inside an unterminated quoted field is not rejected:
    /// the partial field is flushed as the last cell.
    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
        let text = text.replace("\r\n", "\n");

        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut row: Vec<String> = Vec::new();
        let mut field = String::new();
        let mut state = QuoteState::Unquoted;
        let mut chars = text.chars().peekable();

        while let Some(ch) = chars.next() {
            match state {
                QuoteState::Quoted => match ch {
                    '"' if chars.peek() == Some(&'"') => {
                        chars.next();
                        field.push('"');
                    }
                    '"' => state = QuoteState::Unquoted,
                    _ => field.push(ch),
                },
                QuoteState::Unquoted => match ch {
                    '"' => state = QuoteState::Quoted,
                    ',' => row.push(take_trimmed(&mut field)),
                    '\n' => {
                        row.push(take_trimmed(&mut field));
                        rows.push(std::mem::take(&mut row));
                    }
                    _ => field.push(ch),
                },
            }
        }

        let unterminated = state == QuoteState::Quoted;
        if unterminated {
            warn!(
                row = rows.len(),
                "input ended inside a quoted field; flushing the partial field"
            );
        }
        if !field.is_empty() || unterminated || !row.is_empty() {
            row.push(take_trimmed(&mut field));
            rows.push(row);
        }

        while rows.last().is_some_and(|r| is_blank(r)) {
            rows.pop();
        }

        Self::from_rows(rows)
    }

    /// Build a grid from already split rows, trimming every cell and padding
    /// short rows with empty cells up to the widest row.
    pub fn from_rows<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.as_ref().trim().to_string())
                    .collect()
            })
            .collect();

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, String::new());
        }

        Self { rows, width }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first row holding at least one non-empty cell.
    pub fn header_index(&self) -> Option<usize> {
        self.rows.iter().position(|row| !is_blank(row))
    }

    /// Split the grid into its header row and the data rows that follow it.
    /// Blank rows above the header are discarded.
    pub fn split_header(&self) -> Result<(&[String], &[Vec<String>]), GridError> {
        if self.rows.is_empty() {
            return Err(GridError::Empty);
        }
        let idx = self.header_index().ok_or(GridError::MissingHeader)?;
        Ok((&self.rows[idx], &self.rows[idx + 1..]))
    }
}

pub fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

fn take_trimmed(field: &mut String) -> String {
    let value = field.trim().to_string();
    field.clear();
    value
}
