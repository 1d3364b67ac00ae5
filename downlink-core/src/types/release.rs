//! Release metadata as served by the upstream REST API.
//!
//! The shapes mirror the upstream JSON; unknown fields are ignored so the
//! service keeps working when the API grows new ones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DownlinkError, Result};
use crate::platform::extension_for;

/// A tagged release with its downloadable assets.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Release {
    /// Tag the release was cut from (doubles as the version label).
    pub tag_name: String,
    /// Human-readable release title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Web page of the release.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    /// Publication timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    /// Release notes body, markdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Downloadable artifacts, in upstream order.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// A single downloadable artifact attached to a release.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReleaseAsset {
    /// File name of the artifact.
    pub name: String,
    /// Direct download URL.
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Times the artifact has been downloaded.
    #[serde(default)]
    pub download_count: u64,
}

impl Release {
    /// Returns the first asset whose file name ends with `.{extension}`.
    pub fn asset_for_extension(&self, extension: &str) -> Option<&ReleaseAsset> {
        let suffix = format!(".{extension}");
        self.assets.iter().find(|a| a.name.ends_with(&suffix))
    }

    /// Resolves a platform identifier to the matching asset of this release.
    ///
    /// Fails with [`DownlinkError::UnknownPlatform`] when the platform has no
    /// extension mapping, and [`DownlinkError::NoMatchingAsset`] when the
    /// release carries no artifact for the resolved extension.
    pub fn asset_for_platform(&self, platform: &str) -> Result<&ReleaseAsset> {
        let extension = extension_for(platform)
            .ok_or_else(|| DownlinkError::UnknownPlatform(platform.to_string()))?;

        self.asset_for_extension(extension)
            .ok_or_else(|| DownlinkError::NoMatchingAsset {
                tag: self.tag_name.clone(),
                extension: extension.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_release() -> Release {
        Release {
            tag_name: "1.0.0".into(),
            name: Some("1.0.0".into()),
            html_url: None,
            published_at: None,
            body: None,
            assets: vec![
                ReleaseAsset {
                    name: "app-linux.tar.gz".into(),
                    download_url: "https://downloads.test/X".into(),
                    size: 1024,
                    download_count: 0,
                },
                ReleaseAsset {
                    name: "app.exe".into(),
                    download_url: "https://downloads.test/Y".into(),
                    size: 2048,
                    download_count: 0,
                },
            ],
        }
    }

    #[test]
    fn test_asset_for_extension_hit() {
        let release = make_release();

        let asset = release.asset_for_extension("exe").unwrap();
        assert_eq!(asset.download_url, "https://downloads.test/Y");

        let asset = release.asset_for_extension("tar.gz").unwrap();
        assert_eq!(asset.download_url, "https://downloads.test/X");
    }

    #[test]
    fn test_asset_for_extension_miss() {
        let release = make_release();
        assert!(release.asset_for_extension("dmg").is_none());
    }

    #[test]
    fn test_asset_for_platform() {
        let release = make_release();

        let asset = release.asset_for_platform("windows").unwrap();
        assert_eq!(asset.download_url, "https://downloads.test/Y");

        assert!(matches!(
            release.asset_for_platform("mac"),
            Err(DownlinkError::NoMatchingAsset { .. })
        ));
        assert!(matches!(
            release.asset_for_platform("beos"),
            Err(DownlinkError::UnknownPlatform(_))
        ));
    }

    #[test]
    fn test_release_from_upstream_json() {
        let json = r#"{
            "tag_name": "0.89.1",
            "name": "Release 0.89.1",
            "html_url": "https://example.test/releases/0.89.1",
            "published_at": "2024-06-01T12:00:00Z",
            "assets": [
                {
                    "name": "app_0.89.1.dmg",
                    "browser_download_url": "https://example.test/app.dmg",
                    "size": 123456,
                    "download_count": 7,
                    "content_type": "application/octet-stream"
                }
            ]
        }"#;

        let release: Release = serde_json::from_str(json).unwrap();
        assert_eq!(release.tag_name, "0.89.1");
        assert!(release.published_at.is_some());
        assert_eq!(release.assets.len(), 1);
        assert_eq!(release.assets[0].download_url, "https://example.test/app.dmg");
    }

    #[test]
    fn test_release_minimal_json() {
        // Only tag_name is required on the wire
        let release: Release = serde_json::from_str(r#"{"tag_name": "1.0"}"#).unwrap();
        assert!(release.assets.is_empty());
        assert!(release.asset_for_extension("exe").is_none());
    }
}
