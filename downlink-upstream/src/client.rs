//! HTTP client for the two upstream data sources.
//!
//! The version endpoint serves a bare version string; the source-hosting
//! REST API serves release metadata and commit history as JSON.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use downlink_core::constants::{
    COMMITS_PER_PAGE_MAX, COMMITS_PER_PAGE_MIN, DEFAULT_API_URL, DEFAULT_BASE_URL,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, VERSION_PATH,
};
use downlink_core::error::{DownlinkError, Result};
use downlink_core::types::{Commit, Release};

/// Upstream client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the download site (version endpoint lives here).
    pub base_url: String,
    /// REST API root for releases and commits.
    pub api_url: String,
    /// Request timeout in seconds, applied per call.
    pub timeout_seconds: u64,
    /// User agent sent on every request.
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_url: DEFAULT_API_URL.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

impl UpstreamConfig {
    /// Creates a config with the given endpoints.
    pub fn with_urls(base_url: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_url: api_url.into(),
            ..Default::default()
        }
    }
}

/// Client for both upstream sources.
///
/// Each operation performs exactly one upstream interaction; the shared
/// `reqwest::Client` carries the timeout and user agent and is never
/// mutated after construction.
pub struct UpstreamClient {
    config: UpstreamConfig,
    http_client: reqwest::Client,
}

impl UpstreamClient {
    /// Creates a client with default configuration.
    pub fn new() -> Self {
        Self::with_config(UpstreamConfig::default())
    }

    /// Creates a client with custom configuration.
    pub fn with_config(config: UpstreamConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    /// Fetches the latest version string from the download site.
    ///
    /// Surrounding whitespace is trimmed; the content is otherwise passed
    /// through unvalidated.
    #[instrument(skip(self))]
    pub async fn fetch_version(&self) -> Result<String> {
        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            VERSION_PATH
        );

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| DownlinkError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DownlinkError::Upstream(format!(
                "version endpoint returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DownlinkError::Upstream(e.to_string()))?;

        let version = body.trim().to_string();
        debug!(version, "fetched latest version");
        Ok(version)
    }

    /// Fetches metadata of the latest tagged release.
    #[instrument(skip(self))]
    pub async fn fetch_latest_release(&self) -> Result<Release> {
        let url = format!(
            "{}/releases/tags/latest",
            self.config.api_url.trim_end_matches('/')
        );

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| DownlinkError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DownlinkError::Upstream(format!(
                "release endpoint returned {}",
                response.status()
            )));
        }

        let release: Release = response
            .json()
            .await
            .map_err(|e| DownlinkError::Upstream(format!("undecodable release metadata: {e}")))?;

        debug!(tag = %release.tag_name, assets = release.assets.len(), "fetched latest release");
        Ok(release)
    }

    /// Fetches the most recent commits, newest first.
    ///
    /// `limit` is clamped silently to the page-size range the upstream API
    /// accepts; whatever the caller supplied, the request always carries a
    /// value in `[1, 100]`.
    #[instrument(skip(self))]
    pub async fn fetch_commits(&self, limit: u32) -> Result<Vec<Commit>> {
        let per_page = limit.clamp(COMMITS_PER_PAGE_MIN, COMMITS_PER_PAGE_MAX);
        let url = format!("{}/commits", self.config.api_url.trim_end_matches('/'));

        let response = self
            .http_client
            .get(&url)
            .query(&[("per_page", per_page)])
            .send()
            .await
            .map_err(|e| DownlinkError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DownlinkError::Upstream(format!(
                "commits endpoint returned {}",
                response.status()
            )));
        }

        let commits: Vec<Commit> = response
            .json()
            .await
            .map_err(|e| DownlinkError::Upstream(format!("undecodable commit list: {e}")))?;

        debug!(count = commits.len(), per_page, "fetched recent commits");
        Ok(commits)
    }
}

impl Default for UpstreamClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use test_case::test_case;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> UpstreamClient {
        UpstreamClient::with_config(UpstreamConfig::with_urls(server.uri(), server.uri()))
    }

    #[tokio::test]
    async fn test_fetch_version_trims_whitespace() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/downloads/latest_version"))
            .respond_with(ResponseTemplate::new(200).set_body_string("  0.89.1\n"))
            .expect(1)
            .mount(&server)
            .await;

        let version = client_for(&server).fetch_version().await.unwrap();
        assert_eq!(version, "0.89.1");
    }

    #[tokio::test]
    async fn test_fetch_version_non_2xx_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/downloads/latest_version"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_version().await.unwrap_err();
        assert!(err.is_upstream());
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_connection_failure_is_upstream_error() {
        // Nothing listens here
        let client = UpstreamClient::with_config(UpstreamConfig::with_urls(
            "http://127.0.0.1:1",
            "http://127.0.0.1:1",
        ));

        let err = client.fetch_version().await.unwrap_err();
        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn test_fetch_latest_release() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/releases/tags/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tag_name": "0.89.1",
                "name": "Release 0.89.1",
                "published_at": "2024-06-01T12:00:00Z",
                "assets": [
                    {
                        "name": "app_0.89.1.tar.gz",
                        "browser_download_url": "https://downloads.test/app.tar.gz",
                        "size": 42
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let release = client_for(&server).fetch_latest_release().await.unwrap();
        assert_eq!(release.tag_name, "0.89.1");
        assert_eq!(release.assets.len(), 1);
        assert_eq!(
            release.assets[0].download_url,
            "https://downloads.test/app.tar.gz"
        );
    }

    #[tokio::test]
    async fn test_fetch_latest_release_undecodable_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/releases/tags/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_latest_release().await.unwrap_err();
        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn test_fetch_commits() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/commits"))
            .and(query_param("per_page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "sha": "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
                    "commit": {
                        "message": "Newest change",
                        "author": {"name": "Alice", "date": "2024-06-02T08:00:00Z"}
                    }
                },
                {
                    "sha": "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
                    "commit": {"message": "Older change"}
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let commits = client_for(&server).fetch_commits(2).await.unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].summary(), "Newest change");
        assert_eq!(commits[0].author_name(), "Alice");
        assert_eq!(commits[1].author_name(), "unknown");
    }

    #[test_case(0, "1" ; "zero clamps up to one")]
    #[test_case(1, "1" ; "lower bound passes through")]
    #[test_case(42, "42" ; "in range passes through")]
    #[test_case(100, "100" ; "upper bound passes through")]
    #[test_case(500, "100" ; "excess clamps down to hundred")]
    #[tokio::test]
    async fn test_fetch_commits_clamps_page_size(limit: u32, expected: &str) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/commits"))
            .and(query_param("per_page", expected))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let commits = client_for(&server).fetch_commits(limit).await.unwrap();
        assert!(commits.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_commits_non_2xx_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/commits"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_commits(10).await.unwrap_err();
        assert!(err.is_upstream());
    }
}
