//! Upstream fetchers for downlink.
//!
//! One client, three independent operations: the plain-text version
//! endpoint, the latest tagged release, and the recent commit list. Every
//! transport or protocol failure normalizes to
//! [`downlink_core::DownlinkError::Upstream`].

mod client;

pub use client::{UpstreamClient, UpstreamConfig};
