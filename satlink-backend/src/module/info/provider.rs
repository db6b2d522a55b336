///! Encyclopedia provider: page summaries and open-search title suggestions
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use super::types::PageSummary;
use crate::config::InfoConfig;
use crate::module::upstream::{HttpUpstream, UpstreamError, fill_template};

#[async_trait]
pub trait EncyclopediaProvider: Send + Sync {
    /// Summary of the page titled `title`
    async fn summary(&self, title: &str) -> Result<PageSummary, UpstreamError>;

    /// Candidate page titles for a free-text query, best first
    async fn search(&self, query: &str) -> Result<Vec<String>, UpstreamError>;
}

/// Wikipedia REST summary + MediaWiki opensearch client
pub struct WikipediaClient {
    upstream: HttpUpstream,
    config: InfoConfig,
}

impl WikipediaClient {
    pub fn new(upstream: HttpUpstream, config: InfoConfig) -> Self {
        Self { upstream, config }
    }
}

#[async_trait]
impl EncyclopediaProvider for WikipediaClient {
    async fn summary(&self, title: &str) -> Result<PageSummary, UpstreamError> {
        let url = fill_template(&self.config.summary_url, title);
        let body = self
            .upstream
            .get(&url, self.config.timeout())
            .await?
            .into_body_if(StatusCode::OK)?;

        serde_json::from_str(&body).map_err(|e| UpstreamError::Decode {
            url,
            reason: e.to_string(),
        })
    }

    async fn search(&self, query: &str) -> Result<Vec<String>, UpstreamError> {
        let url = fill_template(&self.config.search_url, query);
        let body = self
            .upstream
            .get(&url, self.config.timeout())
            .await?
            .into_body_if(StatusCode::OK)?;

        let value: Value = serde_json::from_str(&body).map_err(|e| UpstreamError::Decode {
            url,
            reason: e.to_string(),
        })?;
        Ok(opensearch_titles(&value))
    }
}

/// Titles from an opensearch reply `[query, [titles...], [descriptions...], [urls...]]`.
/// Any other shape yields no titles.
fn opensearch_titles(value: &Value) -> Vec<String> {
    value
        .as_array()
        .and_then(|reply| reply.get(1))
        .and_then(Value::as_array)
        .map(|titles| {
            titles
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> WikipediaClient {
        let config = InfoConfig {
            summary_url: format!("{}/page/summary/{{}}", server.uri()),
            search_url: format!("{}/w/api.php?action=opensearch&search={{}}&limit=1", server.uri()),
            google_search_url: "https://www.google.com/search?q={}".to_string(),
            timeout_secs: 5,
        };
        WikipediaClient::new(HttpUpstream::new("satlink-test").unwrap(), config)
    }

    #[test]
    fn test_opensearch_titles_shapes() {
        assert_eq!(
            opensearch_titles(&json!(["hubble", ["Hubble Space Telescope"], [""], ["https://x"]])),
            vec!["Hubble Space Telescope".to_string()]
        );
        assert!(opensearch_titles(&json!(["zzqxw", [], [], []])).is_empty());
        assert!(opensearch_titles(&json!(["only one element"])).is_empty());
        assert!(opensearch_titles(&json!({"error": "bad"})).is_empty());
        assert!(opensearch_titles(&json!(["q", "not a list"])).is_empty());
    }

    #[tokio::test]
    async fn test_summary_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page/summary/Hubble%20Space%20Telescope"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "title": "Hubble Space Telescope",
                "extract": "The Hubble Space Telescope is a space telescope.",
                "content_urls": {"desktop": {"page": "https://en.wikipedia.org/wiki/Hubble_Space_Telescope"}}
            })))
            .mount(&server)
            .await;

        let summary = client_for(&server).summary("Hubble Space Telescope").await.unwrap();
        assert_eq!(summary.title(), Some("Hubble Space Telescope"));
        assert_eq!(
            summary.desktop_page(),
            Some("https://en.wikipedia.org/wiki/Hubble_Space_Telescope")
        );
    }

    #[tokio::test]
    async fn test_summary_not_found_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"type": "not_found"})))
            .mount(&server)
            .await;

        let result = client_for(&server).summary("zzqxw_no_match").await;
        assert!(matches!(result, Err(UpstreamError::Status { .. })));
    }

    #[tokio::test]
    async fn test_summary_non_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let result = client_for(&server).summary("Pluto").await;
        assert!(matches!(result, Err(UpstreamError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_search_returns_titles() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("search", "hubble telescope"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                "hubble telescope",
                ["Hubble Space Telescope"],
                [""],
                ["https://en.wikipedia.org/wiki/Hubble_Space_Telescope"]
            ])))
            .mount(&server)
            .await;

        let titles = client_for(&server).search("hubble telescope").await.unwrap();
        assert_eq!(titles, vec!["Hubble Space Telescope".to_string()]);
    }
}
