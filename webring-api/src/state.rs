//! App state: ring cache, config.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tracing::warn;

use webring_cache::RingCache;
use webring_core::constants::{
    DEFAULT_FETCH_TIMEOUT_SECONDS, DEFAULT_PICTURES_DIR, DEFAULT_PORT, DEFAULT_SHEET_RANGE,
};
use webring_core::traits::DataSource;
use webring_core::types::RangeSelector;
use webring_source::{SheetsConfig, SheetsSource};

/// Server configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Listen port
    pub port: u16,
    /// Google Sheets API key
    pub google_api_key: String,
    /// Spreadsheet holding the ring members
    pub spreadsheet_id: String,
    /// Range holding the ring members, one per row
    pub sheet_range: RangeSelector,
    /// Directory served under `/pictures`
    pub pictures_dir: PathBuf,
    /// Timeout for one Sheets request, in seconds
    pub sheets_timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            google_api_key: String::new(),
            spreadsheet_id: String::new(),
            sheet_range: RangeSelector::default(),
            pictures_dir: PathBuf::from(DEFAULT_PICTURES_DIR),
            sheets_timeout_seconds: DEFAULT_FETCH_TIMEOUT_SECONDS,
        }
    }
}

impl ApiConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds config from a variable lookup; unset or unparsable values fall back to defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let sheet_range = match var("SHEET_RANGE") {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                warn!(error = %err, fallback = DEFAULT_SHEET_RANGE, "Ignoring SHEET_RANGE");
                defaults.sheet_range.clone()
            }),
            None => defaults.sheet_range.clone(),
        };

        Self {
            port: var("PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
            google_api_key: var("GOOGLE_API_KEY").unwrap_or_default(),
            spreadsheet_id: var("GOOGLE_SHEET_ID").unwrap_or_default(),
            sheet_range,
            pictures_dir: var("PICTURES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.pictures_dir),
            sheets_timeout_seconds: var("SHEETS_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.sheets_timeout_seconds),
        }
    }

    /// Sheets client settings derived from this config.
    pub fn sheets_config(&self) -> SheetsConfig {
        SheetsConfig::new(&self.google_api_key, &self.spreadsheet_id)
            .with_timeout(self.sheets_timeout_seconds)
    }
}

/// Shared state behind every handler.
pub struct AppState {
    /// Startup configuration
    pub config: ApiConfig,
    /// Cached member list
    pub ring: RingCache,
    /// Process start, for uptime
    pub started_at: Instant,
}

impl AppState {
    /// Creates state backed by the configured spreadsheet.
    pub fn new(config: ApiConfig) -> webring_core::Result<Self> {
        if config.spreadsheet_id.is_empty() {
            warn!("GOOGLE_SHEET_ID is not set; the webring will stay empty");
        }
        if config.google_api_key.is_empty() {
            warn!("GOOGLE_API_KEY is not set; only proxied or public endpoints will work");
        }

        let source = SheetsSource::with_config(config.sheets_config())?;
        Ok(Self::with_source(config, Arc::new(source)))
    }

    /// Creates state backed by an arbitrary data source.
    pub fn with_source(config: ApiConfig, source: Arc<dyn DataSource>) -> Self {
        let ring = RingCache::new(source, config.sheet_range.clone());
        Self::with_cache(config, ring)
    }

    /// Creates state around a prepared cache.
    pub fn with_cache(config: ApiConfig, ring: RingCache) -> Self {
        Self {
            config,
            ring,
            started_at: Instant::now(),
        }
    }
}
