//! In-memory TTL cache for the webring member list.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use webring_core::constants::{CACHE_TTL_SECONDS, DEFAULT_FETCH_TIMEOUT_SECONDS};
use webring_core::error::{Result, WebringError};
use webring_core::traits::{Clock, DataSource};
use webring_core::types::{urls_from_rows, RangeSelector};
use webring_core::SystemClock;

use crate::ring;

/// Cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long a non-empty list is served before refetching, in seconds
    pub ttl_seconds: u64,
    /// Upper bound on one data source call, in seconds
    pub fetch_timeout_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: CACHE_TTL_SECONDS,
            fetch_timeout_seconds: DEFAULT_FETCH_TIMEOUT_SECONDS,
        }
    }
}

struct CacheState {
    urls: Arc<Vec<String>>,
    last_fetched: Option<Instant>,
    fetched_at: Option<DateTime<Utc>>,
    /// Completed fetch attempts, successful or not.
    attempts: u64,
}

/// Snapshot of the cache for health reporting.
#[derive(Clone, Debug, Serialize)]
pub struct CacheStatus {
    /// Members currently held
    pub count: usize,
    /// Wall-clock time of the last successful fetch
    pub last_fetched_at: Option<DateTime<Utc>>,
    /// Whether the next read would be served without contacting the source
    pub fresh: bool,
}

/// Ordered, time-bounded cache of ring members.
///
/// The list is replaced wholesale on every successful fetch and left alone
/// when a fetch fails. Refreshes are single-flight: callers that arrive while
/// a fetch is running wait for it and reuse its outcome.
pub struct RingCache {
    source: Arc<dyn DataSource>,
    clock: Arc<dyn Clock>,
    range: RangeSelector,
    config: CacheConfig,
    state: RwLock<CacheState>,
    refresh_guard: Mutex<()>,
}

impl RingCache {
    /// Creates a cache over `source` with the default configuration and the system clock.
    pub fn new(source: Arc<dyn DataSource>, range: RangeSelector) -> Self {
        Self::with_config(source, range, CacheConfig::default(), Arc::new(SystemClock))
    }

    /// Creates a cache with custom configuration and clock.
    pub fn with_config(
        source: Arc<dyn DataSource>,
        range: RangeSelector,
        config: CacheConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            clock,
            range,
            config,
            state: RwLock::new(CacheState {
                urls: Arc::new(Vec::new()),
                last_fetched: None,
                fetched_at: None,
                attempts: 0,
            }),
            refresh_guard: Mutex::new(()),
        }
    }

    /// The range read from the data source.
    pub fn range(&self) -> &RangeSelector {
        &self.range
    }

    /// Returns the current member list, fetching first if it is stale.
    ///
    /// Never fails: if the data source errors or times out, the previous list
    /// (possibly empty) is returned and the next call tries again.
    pub async fn refresh(&self) -> Arc<Vec<String>> {
        if let Some(urls) = self.fresh_urls() {
            debug!(count = urls.len(), "Serving cached webring URLs");
            return urls;
        }

        let seen = self.state.read().attempts;
        let _guard = self.refresh_guard.lock().await;
        {
            let state = self.state.read();
            if state.attempts != seen {
                return state.urls.clone();
            }
        }

        let outcome = self.fetch().await;

        let mut state = self.state.write();
        state.attempts += 1;
        match outcome {
            Ok(urls) => {
                if urls.is_empty() {
                    info!(source = self.source.name(), range = %self.range, "No data found in data source");
                } else {
                    info!(
                        count = urls.len(),
                        source = self.source.name(),
                        "Fetched webring URLs"
                    );
                }
                state.urls = Arc::new(urls);
                state.last_fetched = Some(self.clock.now());
                state.fetched_at = Some(Utc::now());
            }
            Err(err) => {
                warn!(
                    error = %err,
                    source = self.source.name(),
                    cached = state.urls.len(),
                    "Error fetching webring URLs, serving cached list"
                );
            }
        }
        state.urls.clone()
    }

    /// Member after `current`; an unknown `current` yields the first member.
    pub async fn next(&self, current: &str) -> Result<String> {
        let urls = self.refresh().await;
        ring::next_of(&urls, current)
            .map(str::to_string)
            .ok_or(WebringError::NoUrlsAvailable)
    }

    /// Member before `current`; an unknown `current` yields the last member.
    pub async fn previous(&self, current: &str) -> Result<String> {
        let urls = self.refresh().await;
        ring::previous_of(&urls, current)
            .map(str::to_string)
            .ok_or(WebringError::NoUrlsAvailable)
    }

    /// A uniformly chosen member.
    pub async fn random(&self) -> Result<String> {
        let urls = self.refresh().await;
        ring::pick_random(&urls, &mut rand::thread_rng())
            .map(str::to_string)
            .ok_or(WebringError::NoUrlsAvailable)
    }

    /// The whole member list. An empty ring is a valid answer here.
    pub async fn list(&self) -> Arc<Vec<String>> {
        self.refresh().await
    }

    /// Reports the cache state without triggering a fetch.
    pub fn status(&self) -> CacheStatus {
        let state = self.state.read();
        CacheStatus {
            count: state.urls.len(),
            last_fetched_at: state.fetched_at,
            fresh: self.is_fresh(&state),
        }
    }

    fn ttl(&self) -> Duration {
        Duration::from_secs(self.config.ttl_seconds)
    }

    fn is_fresh(&self, state: &CacheState) -> bool {
        match state.last_fetched {
            Some(last_fetched) if !state.urls.is_empty() => {
                self.clock.now().saturating_duration_since(last_fetched) < self.ttl()
            }
            _ => false,
        }
    }

    fn fresh_urls(&self) -> Option<Arc<Vec<String>>> {
        let state = self.state.read();
        self.is_fresh(&state).then(|| state.urls.clone())
    }

    async fn fetch(&self) -> Result<Vec<String>> {
        let seconds = self.config.fetch_timeout_seconds;
        let rows = tokio::time::timeout(
            Duration::from_secs(seconds),
            self.source.fetch_range(&self.range),
        )
        .await
        .map_err(|_| WebringError::FetchTimeout { seconds })??;
        Ok(urls_from_rows(rows))
    }
}
