//! Platform-name to file-extension resolution.

/// Maps a platform identifier to the file extension of its download artifact.
///
/// Returns `None` for identifiers outside the supported set; callers turn
/// that into a not-found response.
pub fn extension_for(platform: &str) -> Option<&'static str> {
    match platform {
        "android" => Some("apk"),
        "linux" => Some("tar.gz"),
        "mac" => Some("dmg"),
        "windows" => Some("exe"),
        _ => None,
    }
}

/// The platform identifiers [`extension_for`] resolves.
pub const SUPPORTED_PLATFORMS: [&str; 4] = ["android", "linux", "mac", "windows"];
