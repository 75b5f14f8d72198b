//! Data sources feeding the webring cache.
//!
//! [`SheetsSource`] reads a column from a Google spreadsheet through the
//! Sheets v4 REST API; [`FixedSource`] serves a list held in memory.

mod fixed;
mod sheets;

pub use fixed::FixedSource;
pub use sheets::{SheetsConfig, SheetsSource};
