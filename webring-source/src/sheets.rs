//! Google Sheets data source.
//!
//! Reads cell values with `GET /v4/spreadsheets/{id}/values/{range}?key=...`,
//! which works for any sheet shared as "anyone with the link can view".

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use webring_core::constants::{DEFAULT_FETCH_TIMEOUT_SECONDS, SHEETS_API_BASE};
use webring_core::error::{Result, WebringError};
use webring_core::traits::DataSource;
use webring_core::types::{RangeSelector, Row};

/// Sheets client configuration.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SheetsConfig {
    /// API root, `https://sheets.googleapis.com` unless pointed at a proxy or mock
    pub api_base: String,
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Spreadsheet identifier from the sheet's URL
    pub spreadsheet_id: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl SheetsConfig {
    /// Creates config for the public Sheets API.
    pub fn new(api_key: impl Into<String>, spreadsheet_id: impl Into<String>) -> Self {
        Self {
            api_base: SHEETS_API_BASE.into(),
            api_key: api_key.into(),
            spreadsheet_id: spreadsheet_id.into(),
            timeout_seconds: DEFAULT_FETCH_TIMEOUT_SECONDS,
        }
    }

    /// Overrides the API root.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// Reads ring members from a Google spreadsheet.
pub struct SheetsSource {
    config: SheetsConfig,
    http_client: reqwest::Client,
}

impl SheetsSource {
    /// Creates a source with the given config.
    pub fn with_config(config: SheetsConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| WebringError::HttpError(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// The configuration this source was built with.
    pub fn config(&self) -> &SheetsConfig {
        &self.config
    }

    pub(crate) fn values_url(&self, range: &RangeSelector) -> Result<Url> {
        if self.config.spreadsheet_id.trim().is_empty() {
            return Err(WebringError::ConfigError("spreadsheet id not configured".into()));
        }

        let mut url = Url::parse(&self.config.api_base)
            .map_err(|e| WebringError::ConfigError(format!("invalid Sheets API base: {}", e)))?;
        let range = range.to_string();
        url.path_segments_mut()
            .map_err(|_| WebringError::ConfigError("Sheets API base cannot carry a path".into()))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.config.spreadsheet_id.as_str(),
                "values",
                range.as_str(),
            ]);
        if !self.config.api_key.is_empty() {
            url.query_pairs_mut().append_pair("key", &self.config.api_key);
        }
        Ok(url)
    }
}

#[async_trait]
impl DataSource for SheetsSource {
    #[instrument(skip(self, range), fields(range = %range))]
    async fn fetch_range(&self, range: &RangeSelector) -> Result<Vec<Row>> {
        let url = self.values_url(range)?;

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| WebringError::HttpError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WebringError::HttpError(e.to_string()))?;

        if !status.is_success() {
            return Err(WebringError::DataSourceUnavailable(format!(
                "Sheets API returned {}: {}",
                status,
                body.trim()
            )));
        }

        let value_range: ValueRange = serde_json::from_str(&body)?;
        let rows: Vec<Row> = value_range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect();

        debug!(rows = rows.len(), "Fetched rows from Google Sheets");
        Ok(rows)
    }

    fn name(&self) -> &str {
        "google-sheets"
    }
}

/// Body of `spreadsheets.values.get`. `values` is omitted for an empty range.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

fn cell_text(cell: serde_json::Value) -> String {
    match cell {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer) -> SheetsSource {
        let config = SheetsConfig::new("test-key", "sheet-123").with_api_base(server.uri());
        SheetsSource::with_config(config).unwrap()
    }

    #[test]
    fn test_values_url() {
        let config = SheetsConfig::new("k", "abc");
        let source = SheetsSource::with_config(config).unwrap();
        let url = source.values_url(&"Sheet1!A:A".parse().unwrap()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc/values/Sheet1!A:A?key=k"
        );
    }

    #[test]
    fn test_values_url_encodes_sheet_name() {
        let source = SheetsSource::with_config(SheetsConfig::new("", "abc")).unwrap();
        let url = source.values_url(&"Web Ring!A2:A".parse().unwrap()).unwrap();
        assert_eq!(url.path(), "/v4/spreadsheets/abc/values/Web%20Ring!A2:A");
        assert!(url.query().is_none());
    }

    #[test]
    fn test_values_url_requires_spreadsheet_id() {
        let source = SheetsSource::with_config(SheetsConfig::new("k", " ")).unwrap();
        assert!(matches!(
            source.values_url(&RangeSelector::default()),
            Err(WebringError::ConfigError(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_rows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/spreadsheets/sheet-123/values/Sheet1!A:A"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "range": "Sheet1!A1:A3",
                "majorDimension": "ROWS",
                "values": [["https://a.example/"], [], ["https://b.example/", "note"]]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let rows = source_for(&server)
            .fetch_range(&RangeSelector::default())
            .await
            .unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["https://a.example/".to_string()],
                vec![],
                vec!["https://b.example/".to_string(), "note".to_string()],
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_empty_range() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "range": "Sheet1!A1:A1000",
                "majorDimension": "ROWS"
            })))
            .mount(&server)
            .await;

        let rows = source_for(&server)
            .fetch_range(&RangeSelector::default())
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_non_string_cells() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "values": [[42], [null], [true]]
            })))
            .mount(&server)
            .await;

        let rows = source_for(&server)
            .fetch_range(&RangeSelector::default())
            .await
            .unwrap();
        assert_eq!(
            rows,
            vec![vec!["42".to_string()], vec![String::new()], vec!["true".to_string()]]
        );
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let err = source_for(&server)
            .fetch_range(&RangeSelector::default())
            .await
            .unwrap_err();
        assert!(matches!(err, WebringError::DataSourceUnavailable(_)));
        assert!(err.to_string().contains("403"));
        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = source_for(&server)
            .fetch_range(&RangeSelector::default())
            .await
            .unwrap_err();
        assert!(matches!(err, WebringError::JsonError(_)));
    }

    #[tokio::test]
    async fn test_fetch_unreachable() {
        let config = SheetsConfig::new("k", "abc")
            .with_api_base("http://127.0.0.1:9")
            .with_timeout(2);
        let source = SheetsSource::with_config(config).unwrap();

        let err = source.fetch_range(&RangeSelector::default()).await.unwrap_err();
        assert!(matches!(err, WebringError::HttpError(_)));
    }
}
