//! Service constants for downlink.
//!
//! Defaults mirror the deployed instance; every value is overridable through
//! the configuration surface at construction time.

// ═══════════════════════════════════════════════════════════════════════════════
// UPSTREAM ENDPOINTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default base URL of the download site (serves the plain-text version
/// endpoint and the download files themselves).
pub const DEFAULT_BASE_URL: &str = "https://nvgt.gg";

/// Default REST API root for the project's source hosting (releases, commits).
pub const DEFAULT_API_URL: &str = "https://api.github.com/repos/samtupy/nvgt";

/// Path of the plain-text version endpoint, relative to the base URL.
pub const VERSION_PATH: &str = "downloads/latest_version";

/// User agent sent on every upstream request. The hosting API rejects
/// anonymous requests without one.
pub const DEFAULT_USER_AGENT: &str = concat!("downlink/", env!("CARGO_PKG_VERSION"));

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE TTLS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default TTL for the cached version string, in seconds.
pub const DEFAULT_VERSION_TTL_SECS: u64 = 300;

/// Default TTL for the cached release metadata, in seconds.
pub const DEFAULT_RELEASE_TTL_SECS: u64 = 900;

/// Default TTL for the cached commit list, in seconds.
pub const DEFAULT_COMMITS_TTL_SECS: u64 = 900;

// ═══════════════════════════════════════════════════════════════════════════════
// REQUEST LIMITS
// ═══════════════════════════════════════════════════════════════════════════════

/// Smallest commit page size the upstream API accepts.
pub const COMMITS_PER_PAGE_MIN: u32 = 1;

/// Largest commit page size the upstream API accepts.
pub const COMMITS_PER_PAGE_MAX: u32 = 100;

/// Default number of commits the service requests and renders.
pub const DEFAULT_COMMITS_LIMIT: u32 = 30;

/// Default network timeout for a single upstream call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Length of the abbreviated commit identifier.
pub const SHORT_SHA_LEN: usize = 7;
