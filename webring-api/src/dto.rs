//! DTOs for API responses.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single ring member.
#[derive(Debug, Serialize)]
pub struct UrlResponse {
    /// The member URL
    pub url: String,
}

/// The whole ring.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Members in ring order
    pub urls: Vec<String>,
    /// Number of members
    pub count: usize,
}

/// A picture available under `/pictures`.
#[derive(Debug, Serialize)]
pub struct PictureDto {
    /// File name inside the pictures directory
    pub filename: String,
    /// Path the picture is served from
    pub url: String,
}

impl PictureDto {
    /// Entry for `filename`, served from `/pictures/<filename>`.
    pub fn new(filename: String) -> Self {
        let url = format!("/pictures/{}", filename);
        Self { filename, url }
    }
}

/// Response for `/pictures/list`.
#[derive(Debug, Serialize)]
pub struct PictureListResponse {
    /// Pictures sorted by file name
    pub pictures: Vec<PictureDto>,
    /// Number of pictures
    pub count: usize,
}

/// Response for `/`.
#[derive(Debug, Serialize)]
pub struct ServiceInfoResponse {
    /// Service name
    pub name: &'static str,
    /// Service version
    pub version: &'static str,
    /// Endpoint path → description
    pub endpoints: EndpointsDto,
}

/// Endpoint map, kept as a struct so the JSON keys stay in route order.
#[derive(Debug, Serialize)]
pub struct EndpointsDto {
    #[serde(rename = "/next")]
    pub next: &'static str,
    #[serde(rename = "/previous")]
    pub previous: &'static str,
    #[serde(rename = "/random")]
    pub random: &'static str,
    #[serde(rename = "/list")]
    pub list: &'static str,
    #[serde(rename = "/pictures/:filename")]
    pub picture: &'static str,
    #[serde(rename = "/pictures/list")]
    pub pictures: &'static str,
    #[serde(rename = "/health")]
    pub health: &'static str,
}

impl Default for EndpointsDto {
    fn default() -> Self {
        Self {
            next: "Get next webring URL (requires ?current=URL parameter)",
            previous: "Get previous webring URL (requires ?current=URL parameter)",
            random: "Get random webring URL",
            list: "Get all webring URLs",
            picture: "Get a specific picture from the pictures directory",
            pictures: "Get all available pictures",
            health: "Service and cache status",
        }
    }
}

/// Response for `/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests
    pub status: String,
    /// Service version
    pub version: String,
    /// Seconds since startup
    pub uptime_seconds: u64,
    /// Members currently cached
    pub url_count: usize,
    /// Last successful fetch from the data source
    pub last_fetched_at: Option<DateTime<Utc>>,
    /// Whether the cache would answer without a fetch
    pub cache_fresh: bool,
}
