//! TTL cache cells for downlink upstream data.
//!
//! One cell per upstream resource, pull-based expiry only.

mod cache;

pub use cache::TtlCache;
