//! # Downlink Core
//!
//! Core types, errors, and constants for the downlink download service.
//!
//! This crate provides the foundational building blocks used by all other
//! downlink crates:
//!
//! - **Types**: Domain models for upstream releases, assets, and commits
//! - **Errors**: The service error taxonomy
//! - **Platform**: The platform-name to file-extension table
//! - **Constants**: Default upstream endpoints, TTLs, and limits
//!
//! ## Example
//!
//! ```rust
//! use downlink_core::{extension_for, Release};
//!
//! assert_eq!(extension_for("linux"), Some("tar.gz"));
//!
//! // Wire types deserialize straight from the upstream API
//! let release: Release = serde_json::from_str(
//!     r#"{"tag_name": "1.0.0", "assets": []}"#,
//! ).unwrap();
//! assert_eq!(release.tag_name, "1.0.0");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod platform;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{DownlinkError, Result};
pub use platform::extension_for;
pub use types::*;
