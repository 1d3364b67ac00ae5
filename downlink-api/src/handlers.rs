//! API route handlers.
//!
//! Handlers only format cached data into responses; every upstream decision
//! (fetch or serve held value) lives behind the [`AppState`] accessors.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::info;

use downlink_cache::TtlCache;
use downlink_core::platform::extension_for;

use crate::dto::{
    CacheStatusDto, CommitDto, HealthResponse, ReleaseResponse, VersionResponse,
};
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /
pub async fn home() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let caches = vec![
        cache_status(&state.version_cache).await,
        cache_status(&state.release_cache).await,
        cache_status(&state.commits_cache).await,
    ];

    Json(HealthResponse {
        status: "ok",
        caches,
    })
}

async fn cache_status<T: Clone>(cache: &TtlCache<T>) -> CacheStatusDto {
    CacheStatusDto {
        name: cache.name(),
        fresh: cache.is_fresh().await,
        age_seconds: cache.age().await.map(|age| age.as_secs()),
        ttl_seconds: cache.ttl().as_secs(),
    }
}

/// GET /version
pub async fn version_text(State(state): State<Arc<AppState>>) -> Result<String> {
    Ok(state.latest_version().await?)
}

/// GET /version.json
pub async fn version_json(
    State(state): State<Arc<AppState>>,
) -> Result<Json<VersionResponse>> {
    let version = state.latest_version().await?;
    Ok(Json(VersionResponse { version }))
}

/// GET /release
pub async fn latest_release(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReleaseResponse>> {
    let release = state.latest_release().await?;
    Ok(Json(ReleaseResponse::from(&release)))
}

/// GET /commits
pub async fn recent_commits(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CommitDto>>> {
    let commits = state.recent_commits().await?;
    Ok(Json(commits.iter().map(CommitDto::from).collect()))
}

/// GET /:platform
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(platform): Path<String>,
) -> Result<Response> {
    // Unknown platforms are settled before the upstream is touched
    if extension_for(&platform).is_none() {
        return Err(ApiError::not_found(format!("unknown platform: {platform}")));
    }

    let release = state.latest_release().await?;
    let asset = release.asset_for_platform(&platform)?;

    info!(
        platform = %platform,
        tag = %release.tag_name,
        asset = %asset.name,
        "redirecting to download"
    );

    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, asset.download_url.clone())],
    )
        .into_response())
}
