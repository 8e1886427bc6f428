use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::controllers::poll_controllers::models::{parse_poll_id, MessageResponse};
use crate::middleware::guards::AdminUser;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

pub async fn delete_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> AppResult<Json<MessageResponse>> {
    let poll_id = parse_poll_id(&poll_id)?;

    state
        .store
        .find_poll(poll_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    let removed_votes = state.store.delete_votes_for_poll(poll_id).await?;
    state.store.delete_poll(poll_id).await?;

    info!(poll_id = %poll_id, removed_votes, admin = %admin.username, "Poll deleted");

    Ok(Json(MessageResponse {
        message: "Poll deleted successfully".to_string(),
    }))
}
