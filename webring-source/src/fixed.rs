//! In-memory data source.

use async_trait::async_trait;

use webring_core::error::Result;
use webring_core::traits::DataSource;
use webring_core::types::{RangeSelector, Row};

/// Serves a fixed member list, one URL per row, whatever range is asked for.
#[derive(Clone, Debug, Default)]
pub struct FixedSource {
    urls: Vec<String>,
}

impl FixedSource {
    /// Creates a source over `urls`.
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
        }
    }

    /// A small ring for local runs without spreadsheet credentials.
    pub fn demo() -> Self {
        Self::new([
            "https://andrewpetrucci.github.io/LemonadeStandAnarcyWebRing/",
            "https://example.com/site1",
            "https://example.com/site2",
            "https://example.com/site3",
            "https://example.com/site4",
        ])
    }
}

#[async_trait]
impl DataSource for FixedSource {
    async fn fetch_range(&self, _range: &RangeSelector) -> Result<Vec<Row>> {
        Ok(self.urls.iter().map(|url| vec![url.clone()]).collect())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_rows() {
        let source = FixedSource::new(["https://a.example/", "https://b.example/"]);
        let rows = source.fetch_range(&RangeSelector::default()).await.unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["https://a.example/".to_string()],
                vec!["https://b.example/".to_string()],
            ]
        );
    }

    #[tokio::test]
    async fn test_demo_ring() {
        let rows = FixedSource::demo()
            .fetch_range(&RangeSelector::default())
            .await
            .unwrap();
        assert_eq!(rows.len(), 5);
    }
}
