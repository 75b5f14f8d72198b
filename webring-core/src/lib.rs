//! # Webring Core
//!
//! Core types, errors, and traits shared by the webring crates.
//!
//! - **Types**: [`RangeSelector`] and the raw [`Row`] shape returned by data sources
//! - **Errors**: [`WebringError`] and the crate-wide [`Result`] alias
//! - **Constants**: cache timings and defaults
//! - **Traits**: [`DataSource`] and [`Clock`], the two seams the ring cache is built on
//!
//! ## Example
//!
//! ```rust
//! use webring_core::RangeSelector;
//!
//! let range: RangeSelector = "Sheet1!A:A".parse().unwrap();
//! assert_eq!(range.sheet(), Some("Sheet1"));
//! assert_eq!(range.to_string(), "Sheet1!A:A");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod clock;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

pub use clock::{ManualClock, SystemClock};
pub use constants::*;
pub use error::{Result, WebringError};
pub use traits::*;
pub use types::*;
