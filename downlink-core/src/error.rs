//! Error types for downlink.
//!
//! The cache and fetch core propagates exactly one error kind —
//! [`DownlinkError::Upstream`] — covering transport failures, non-2xx
//! statuses, and malformed response bodies alike. The remaining variants are
//! produced by the boundary layer when resolving a platform to a download.

use thiserror::Error;

/// Result type alias using `DownlinkError`.
pub type Result<T> = std::result::Result<T, DownlinkError>;

/// Main error type for all downlink operations.
#[derive(Debug, Error)]
pub enum DownlinkError {
    /// An upstream fetch could not produce a value. Network failures,
    /// unexpected statuses, and undecodable bodies are not distinguished
    /// at this layer.
    #[error("upstream request failed: {0}")]
    Upstream(String),

    /// The requested platform has no entry in the extension table.
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),

    /// The latest release carries no asset for the resolved extension.
    #[error("release {tag} has no .{extension} asset")]
    NoMatchingAsset {
        /// Tag of the release that was scanned.
        tag: String,
        /// File extension that was looked for.
        extension: String,
    },
}

impl DownlinkError {
    /// Returns true if this error came from the upstream rather than from
    /// the caller's request.
    pub fn is_upstream(&self) -> bool {
        matches!(self, DownlinkError::Upstream(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DownlinkError::NoMatchingAsset {
            tag: "1.0.0".into(),
            extension: "dmg".into(),
        };
        assert!(err.to_string().contains("1.0.0"));
        assert!(err.to_string().contains(".dmg"));
    }

    #[test]
    fn test_error_classification() {
        assert!(DownlinkError::Upstream("timeout".into()).is_upstream());
        assert!(!DownlinkError::UnknownPlatform("beos".into()).is_upstream());
    }
}
