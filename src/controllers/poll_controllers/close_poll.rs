use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use tracing::info;

use crate::controllers::poll_controllers::models::{parse_poll_id, populate_poll, PollResponse};
use crate::middleware::guards::AdminUser;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

pub async fn close_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> AppResult<Json<PollResponse>> {
    let poll_id = parse_poll_id(&poll_id)?;

    let updated_poll = state
        .store
        .set_poll_status(poll_id, false, Some(Utc::now()))
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    info!(poll_id = %poll_id, admin = %admin.username, "Poll closed");

    Ok(Json(populate_poll(state.store.as_ref(), updated_poll).await?))
}

/// Reopens voting. Counters and votes are left as they were.
pub async fn reopen_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> AppResult<Json<PollResponse>> {
    let poll_id = parse_poll_id(&poll_id)?;

    let updated_poll = state
        .store
        .set_poll_status(poll_id, true, None)
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    info!(poll_id = %poll_id, admin = %admin.username, "Poll reopened");

    Ok(Json(populate_poll(state.store.as_ref(), updated_poll).await?))
}
