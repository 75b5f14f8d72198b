//! TTL ring cache for the webring service.
//!
//! Holds the ordered member list fetched from a [`DataSource`](webring_core::DataSource),
//! serves it for five minutes, and answers circular navigation queries over it.
//! Upstream failures never reach the caller: the last good list is served instead.

mod cache;
pub mod ring;

pub use cache::{CacheConfig, CacheStatus, RingCache};
