//! Time-based cache cell with pull-through refresh.

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;

use downlink_core::Result;

/// Interior state of a cell. `value` and `fetched_at` are only ever
/// replaced together by a successful fetch.
struct CacheState<T> {
    value: Option<T>,
    fetched_at: Option<Instant>,
}

/// A single-value cache with a fixed time-to-live and an injected fetch
/// operation (cache-aside, pull-based refresh only).
///
/// One cell exists per upstream resource kind. The cell guarantees that the
/// fetch operation runs at most once per TTL window: within the window every
/// caller gets the held value without touching the upstream. Once the window
/// lapses, the next caller fetches; a failed fetch propagates the error and
/// leaves the previously held value (and its timestamp) untouched, so the
/// following caller attempts again — there is no backoff and no
/// serve-stale-forever fallback.
///
/// The entry lock is held across the fetch-and-update sequence, so at most
/// one upstream fetch per cell is in flight at any instant; callers queued
/// behind a successful refresh observe the fresh value without fetching.
/// Cells never share locks.
pub struct TtlCache<T> {
    name: &'static str,
    ttl: Duration,
    state: Mutex<CacheState<T>>,
}

impl<T: Clone> TtlCache<T> {
    /// Creates an empty cell. `name` labels the cell in logs.
    pub fn new(name: &'static str, ttl: Duration) -> Self {
        Self {
            name,
            ttl,
            state: Mutex::new(CacheState {
                value: None,
                fetched_at: None,
            }),
        }
    }

    /// Returns the cell's log label.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the held value, or fetches a fresh one when the cell is unset
    /// or its TTL has lapsed.
    ///
    /// A cell is fresh iff a value is held and strictly less than `ttl` has
    /// passed since the last successful fetch; a zero TTL therefore fetches
    /// on every call. On fetch failure the error is returned unchanged and
    /// the cell keeps its previous state.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut state = self.state.lock().await;

        if let Some(value) = fresh_value(&state, self.ttl) {
            debug!(cache = self.name, "cache hit");
            return Ok(value);
        }

        debug!(cache = self.name, "cache unset or expired, fetching");
        let value = fetch().await?;

        state.value = Some(value.clone());
        state.fetched_at = Some(Instant::now());
        debug!(cache = self.name, "cache refreshed");

        Ok(value)
    }

    /// Returns the held value regardless of freshness, without fetching.
    pub async fn peek(&self) -> Option<T> {
        self.state.lock().await.value.clone()
    }

    /// Returns true when a held value is still within its TTL.
    pub async fn is_fresh(&self) -> bool {
        fresh_value(&*self.state.lock().await, self.ttl).is_some()
    }

    /// Returns time since the last successful fetch, `None` before the first.
    pub async fn age(&self) -> Option<Duration> {
        self.state.lock().await.fetched_at.map(|at| at.elapsed())
    }
}

fn fresh_value<T: Clone>(state: &CacheState<T>, ttl: Duration) -> Option<T> {
    match (&state.value, state.fetched_at) {
        (Some(value), Some(at)) if at.elapsed() < ttl => Some(value.clone()),
        _ => None,
    }
}
