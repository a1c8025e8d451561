use crate::error::{AppError, AppResult};
use crate::models::{DeactivateResponse, LinkAdminResponse};
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Json};
use std::sync::Arc;

use super::AppState;

/// View a link's details by its secret key.
///
/// No active-state filter: the admin page of a deactivated link stays
/// viewable for history.
pub async fn get_link(
    State(state): State<Arc<AppState>>,
    Path(secret_key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let record = state
        .repository
        .find_by_secret_key(&secret_key)
        .await?
        .ok_or_else(|| AppError::LinkNotFound("unknown admin key".to_string()))?;

    let response = LinkAdminResponse::from_record(record, &state.base_url);
    Ok(Json(response))
}

/// Deactivate a link by its secret key (soft delete).
///
/// Idempotent: a second call succeeds and returns the same inactive
/// record. There is no reactivation path.
pub async fn delete_link(
    State(state): State<Arc<AppState>>,
    Path(secret_key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let record = state
        .repository
        .deactivate(&secret_key)
        .await?
        .ok_or_else(|| AppError::LinkNotFound("unknown admin key".to_string()))?;

    // Redirect lookups must stop resolving immediately
    if state.cache_enabled {
        let _ = state.cache.delete_link(&record.key).await;
    }

    let detail = format!("Deactivated short link for '{}'", record.target_url);
    let response = DeactivateResponse {
        detail,
        link: LinkAdminResponse::from_record(record, &state.base_url),
    };

    Ok(Json(response))
}
