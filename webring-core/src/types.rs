//! Domain types for the webring service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WebringError};

/// One row of cell values, as returned by a [`DataSource`](crate::DataSource).
pub type Row = Vec<String>;

/// A rectangular region of a spreadsheet in A1 notation.
///
/// `"Sheet1!A:A"` names column A of the tab `Sheet1`; `"A:A"` leaves the tab
/// to the provider's default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RangeSelector {
    sheet: Option<String>,
    cells: String,
}

impl RangeSelector {
    /// Creates a selector from its parts.
    pub fn new(sheet: Option<&str>, cells: &str) -> Result<Self> {
        let cells = cells.trim();
        if cells.is_empty() {
            return Err(WebringError::InvalidRange(cells.to_string()));
        }
        let sheet = match sheet.map(str::trim) {
            Some("") => return Err(WebringError::InvalidRange(format!("!{}", cells))),
            other => other.map(str::to_string),
        };
        Ok(Self {
            sheet,
            cells: cells.to_string(),
        })
    }

    /// The tab name, if one was given.
    pub fn sheet(&self) -> Option<&str> {
        self.sheet.as_deref()
    }

    /// The cell range part, e.g. `A:A` or `A2:A100`.
    pub fn cells(&self) -> &str {
        &self.cells
    }
}

impl FromStr for RangeSelector {
    type Err = WebringError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(WebringError::InvalidRange(s.to_string()));
        }
        // Tab names may themselves contain '!', so split on the last one.
        match s.rsplit_once('!') {
            Some((sheet, cells)) => Self::new(Some(sheet), cells)
                .map_err(|_| WebringError::InvalidRange(s.to_string())),
            None => Self::new(None, s),
        }
    }
}

impl TryFrom<String> for RangeSelector {
    type Error = WebringError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<RangeSelector> for String {
    fn from(range: RangeSelector) -> Self {
        range.to_string()
    }
}

impl fmt::Display for RangeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sheet {
            Some(sheet) => write!(f, "{}!{}", sheet, self.cells),
            None => f.write_str(&self.cells),
        }
    }
}

impl Default for RangeSelector {
    fn default() -> Self {
        Self {
            sheet: Some("Sheet1".into()),
            cells: "A:A".into(),
        }
    }
}

/// Extracts the ring members from raw rows.
///
/// Takes the first cell of every row, drops missing and blank values, and
/// trims the rest. Row order is kept and duplicates are not collapsed.
pub fn urls_from_rows(rows: Vec<Row>) -> Vec<String> {
    rows.into_iter()
        .filter_map(|row| row.into_iter().next())
        .map(|cell| cell.trim().to_string())
        .filter(|cell| !cell.is_empty())
        .collect()
}
