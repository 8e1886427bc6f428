use axum::{
    extract::{Path, State},
    Json,
};

use crate::controllers::poll_controllers::models::{parse_poll_id, populate_poll, PollDetailResponse};
use crate::middleware::guards::AuthUser;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

pub async fn get_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<PollDetailResponse>> {
    let poll_id = parse_poll_id(&poll_id)?;

    let poll = state
        .store
        .find_poll(poll_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    let user_vote = state
        .store
        .find_vote(poll_id, user.id)
        .await?
        .map(|vote| vote.option_id);

    Ok(Json(PollDetailResponse {
        poll: populate_poll(state.store.as_ref(), poll).await?,
        user_vote,
    }))
}
