//! Common traits for the webring service.
//!
//! The ring cache only ever talks to the outside world through these two
//! seams, which is what makes its TTL and failure handling testable without
//! a network or a real clock.

use std::time::Instant;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{RangeSelector, Row};

// ═══════════════════════════════════════════════════════════════════════════════
// DATA SOURCE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// A remote tabular data provider.
///
/// Implementations might be:
/// - Google Sheets (production)
/// - A fixed in-memory list (demo mode, tests)
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Reads every row in `range`.
    ///
    /// Each row is the ordered list of cell values; rows may be ragged or
    /// empty. Credentials are the implementation's concern.
    async fn fetch_range(&self, range: &RangeSelector) -> Result<Vec<Row>>;

    /// Short human-readable name used in logs.
    fn name(&self) -> &str;
}

// ═══════════════════════════════════════════════════════════════════════════════
// CLOCK TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Monotonic time source.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}
