//! Service constants.

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE TIMINGS
// ═══════════════════════════════════════════════════════════════════════════════

/// How long a fetched URL list is served before the data source is asked again.
pub const CACHE_TTL_SECONDS: u64 = 5 * 60;

/// Upper bound on a single data source call made by the ring cache.
pub const DEFAULT_FETCH_TIMEOUT_SECONDS: u64 = 10;

// ═══════════════════════════════════════════════════════════════════════════════
// DATA SOURCE DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Range read when no selector is configured: the whole of column A.
pub const DEFAULT_SHEET_RANGE: &str = "Sheet1!A:A";

/// Base URL of the Google Sheets REST API.
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

// ═══════════════════════════════════════════════════════════════════════════════
// HTTP SURFACE
// ═══════════════════════════════════════════════════════════════════════════════

/// Port used when neither `PORT` nor `--port` is given.
pub const DEFAULT_PORT: u16 = 3000;

/// Directory scanned by the picture endpoints when `PICTURES_DIR` is unset.
pub const DEFAULT_PICTURES_DIR: &str = "pictures";

/// File extensions (lowercase, without dot) listed by `/pictures/list`.
pub const PICTURE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg"];

/// Public name reported by the service descriptor.
pub const SERVICE_NAME: &str = "Lemonade Stand Anarchy WebRing API";
