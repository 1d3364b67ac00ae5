//! DTOs for API responses.

use chrono::{DateTime, Utc};
use serde::Serialize;

use downlink_core::types::{Commit, Release, ReleaseAsset};

/// Response for the JSON version endpoint.
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    /// Latest version string, as published by the download site.
    pub version: String,
}

/// JSON view of the latest release.
#[derive(Debug, Serialize)]
pub struct ReleaseResponse {
    /// Release tag.
    pub tag: String,
    /// Human-readable release title.
    pub name: Option<String>,
    /// Web page of the release.
    pub html_url: Option<String>,
    /// Publication timestamp.
    pub published_at: Option<DateTime<Utc>>,
    /// Downloadable artifacts.
    pub assets: Vec<AssetDto>,
}

/// One downloadable artifact.
#[derive(Debug, Serialize)]
pub struct AssetDto {
    /// File name.
    pub name: String,
    /// Direct download URL.
    pub download_url: String,
    /// Size in bytes.
    pub size: u64,
    /// Times downloaded.
    pub download_count: u64,
}

/// One commit in the recent-commits listing.
#[derive(Debug, Serialize)]
pub struct CommitDto {
    /// Abbreviated commit identifier.
    pub sha: String,
    /// Author display name.
    pub author: String,
    /// First line of the commit message.
    pub message: String,
}

/// Liveness response with per-cache freshness.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok" when the process answers.
    pub status: &'static str,
    /// Freshness of each cache cell.
    pub caches: Vec<CacheStatusDto>,
}

/// Freshness of one cache cell.
#[derive(Debug, Serialize)]
pub struct CacheStatusDto {
    /// Cell name.
    pub name: &'static str,
    /// Whether the held value is within its TTL.
    pub fresh: bool,
    /// Seconds since the last successful fetch, absent before the first.
    pub age_seconds: Option<u64>,
    /// Configured TTL in seconds.
    pub ttl_seconds: u64,
}

impl From<&Release> for ReleaseResponse {
    fn from(release: &Release) -> Self {
        Self {
            tag: release.tag_name.clone(),
            name: release.name.clone(),
            html_url: release.html_url.clone(),
            published_at: release.published_at,
            assets: release.assets.iter().map(AssetDto::from).collect(),
        }
    }
}

impl From<&ReleaseAsset> for AssetDto {
    fn from(asset: &ReleaseAsset) -> Self {
        Self {
            name: asset.name.clone(),
            download_url: asset.download_url.clone(),
            size: asset.size,
            download_count: asset.download_count,
        }
    }
}

impl From<&Commit> for CommitDto {
    fn from(commit: &Commit) -> Self {
        Self {
            sha: commit.short_sha().to_string(),
            author: commit.author_name().to_string(),
            message: commit.summary().to_string(),
        }
    }
}
