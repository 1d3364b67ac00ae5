//! App state: configuration, upstream client, and the three cache cells.

use std::time::Duration;

use downlink_cache::TtlCache;
use downlink_core::constants::{
    DEFAULT_API_URL, DEFAULT_BASE_URL, DEFAULT_COMMITS_LIMIT, DEFAULT_COMMITS_TTL_SECS,
    DEFAULT_RELEASE_TTL_SECS, DEFAULT_TIMEOUT_SECS, DEFAULT_VERSION_TTL_SECS,
};
use downlink_core::error::Result;
use downlink_core::types::{Commit, Release};
use downlink_upstream::{UpstreamClient, UpstreamConfig};

/// Service configuration, consumed once at construction.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// Base URL of the download site.
    pub base_url: String,
    /// REST API root for releases and commits.
    pub api_url: String,
    /// TTL of the cached version string, seconds.
    pub version_ttl_seconds: u64,
    /// TTL of the cached release metadata, seconds.
    pub release_ttl_seconds: u64,
    /// TTL of the cached commit list, seconds.
    pub commits_ttl_seconds: u64,
    /// Number of commits requested from the upstream.
    pub commits_limit: u32,
    /// Per-call upstream timeout, seconds.
    pub timeout_seconds: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_url: DEFAULT_API_URL.into(),
            version_ttl_seconds: DEFAULT_VERSION_TTL_SECS,
            release_ttl_seconds: DEFAULT_RELEASE_TTL_SECS,
            commits_ttl_seconds: DEFAULT_COMMITS_TTL_SECS,
            commits_limit: DEFAULT_COMMITS_LIMIT,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ServiceConfig {
    /// Loads configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            base_url: env_or("DOWNLINK_BASE_URL", DEFAULT_BASE_URL),
            api_url: env_or("DOWNLINK_API_URL", DEFAULT_API_URL),
            version_ttl_seconds: env_parsed("DOWNLINK_VERSION_TTL_SECS", DEFAULT_VERSION_TTL_SECS),
            release_ttl_seconds: env_parsed("DOWNLINK_RELEASE_TTL_SECS", DEFAULT_RELEASE_TTL_SECS),
            commits_ttl_seconds: env_parsed("DOWNLINK_COMMITS_TTL_SECS", DEFAULT_COMMITS_TTL_SECS),
            commits_limit: env_parsed("DOWNLINK_COMMITS_LIMIT", DEFAULT_COMMITS_LIMIT),
            timeout_seconds: env_parsed("DOWNLINK_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Shared application state: one cache cell per upstream resource, all
/// backed by the same upstream client.
pub struct AppState {
    /// Service configuration.
    pub config: ServiceConfig,
    /// Client for both upstream sources.
    pub upstream: UpstreamClient,
    /// Cache of the plain-text version string.
    pub version_cache: TtlCache<String>,
    /// Cache of the latest release metadata.
    pub release_cache: TtlCache<Release>,
    /// Cache of the recent commit list.
    pub commits_cache: TtlCache<Vec<Commit>>,
}

impl AppState {
    /// Wires the cache cells and upstream client from the configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let upstream = UpstreamClient::with_config(UpstreamConfig {
            base_url: config.base_url.clone(),
            api_url: config.api_url.clone(),
            timeout_seconds: config.timeout_seconds,
            ..Default::default()
        });

        Self {
            upstream,
            version_cache: TtlCache::new(
                "version",
                Duration::from_secs(config.version_ttl_seconds),
            ),
            release_cache: TtlCache::new(
                "release",
                Duration::from_secs(config.release_ttl_seconds),
            ),
            commits_cache: TtlCache::new(
                "commits",
                Duration::from_secs(config.commits_ttl_seconds),
            ),
            config,
        }
    }

    /// Latest version string, read through the version cache.
    pub async fn latest_version(&self) -> Result<String> {
        self.version_cache
            .get_or_fetch(|| self.upstream.fetch_version())
            .await
    }

    /// Latest release metadata, read through the release cache.
    pub async fn latest_release(&self) -> Result<Release> {
        self.release_cache
            .get_or_fetch(|| self.upstream.fetch_latest_release())
            .await
    }

    /// Recent commits, read through the commits cache.
    pub async fn recent_commits(&self) -> Result<Vec<Commit>> {
        let limit = self.config.commits_limit;
        self.commits_cache
            .get_or_fetch(|| self.upstream.fetch_commits(limit))
            .await
    }
}
