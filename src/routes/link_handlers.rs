use crate::error::{AppError, AppResult};
use crate::models::{CreateLinkRequest, CreateLinkResponse, LinkRecord};
use crate::services::keygen::KeyService;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect};
use std::sync::Arc;
use url::Url as UrlParser;
use validator::Validate;

use super::AppState;

/// Create a short link
pub async fn create_link(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateLinkRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::InvalidUrl(format!("Validation failed: {}", e)))?;

    // Only well-formed absolute http(s) URLs are accepted
    UrlParser::parse(&payload.target_url)
        .map_err(|_| AppError::InvalidUrl("Invalid URL format".to_string()))?;

    if !payload.target_url.starts_with("http://") && !payload.target_url.starts_with("https://") {
        return Err(AppError::InvalidUrl(
            "URL must start with http:// or https://".to_string(),
        ));
    }

    // Allocate both keys before touching the table; each is re-drawn on
    // collision with any record ever created
    let key = KeyService::generate_key(
        state.key_length,
        state.generation_max_attempts,
        &state.repository,
    )
    .await?;
    let secret_key = KeyService::generate_secret_key(
        state.secret_key_length,
        state.generation_max_attempts,
        &state.repository,
    )
    .await?;

    let record = state
        .repository
        .create_link(&key, &secret_key, &payload.target_url)
        .await?;

    // Cache new link if enabled
    if state.cache_enabled {
        let _ = state.cache.set_link(&record).await;
    }

    let response = CreateLinkResponse::from_record(record, &state.base_url);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Resolve a short link and redirect
pub async fn resolve_link(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    // Check cache first if enabled
    if state.cache_enabled {
        if let Some(record) = state.cache.get_link(&key).await? {
            return handle_redirect(&state, &record);
        }
    }

    // Cache miss - check database; deactivated links are invisible here
    let record = state
        .repository
        .find_by_key(&key)
        .await?
        .ok_or(AppError::LinkNotFound(key.clone()))?;

    // Cache for future requests if enabled
    if state.cache_enabled {
        let _ = state.cache.set_link(&record).await;
    }

    handle_redirect(&state, &record)
}

/// Count the click and send the visitor on.
///
/// Temporary redirect, not permanent: clients must keep coming back
/// through the service or clicks stop counting.
fn handle_redirect(state: &Arc<AppState>, record: &LinkRecord) -> AppResult<Redirect> {
    // Submit click accounting job to the worker
    state.job_sender.record_click(record.key.clone());

    // The cached copy now carries a stale click count; drop it off-path
    if state.cache_enabled {
        let cache = state.cache.clone();
        let key = record.key.clone();
        tokio::spawn(async move {
            if let Err(e) = cache.delete_link(&key).await {
                tracing::error!("Failed to invalidate cache for {}: {:?}", key, e);
            }
        });
    }

    Ok(Redirect::temporary(&record.target_url))
}
