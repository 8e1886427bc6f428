use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::controllers::poll_controllers::models::{populate_poll, CreatePollRequest, PollResponse};
use crate::middleware::guards::AdminUser;
use crate::models::poll_models::{normalize_option_texts, normalize_title, Poll};
use crate::state::AppState;
use crate::utils::error::AppResult;
use crate::utils::extract::AppJson;

pub async fn create_poll(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    AppJson(payload): AppJson<CreatePollRequest>,
) -> AppResult<(StatusCode, Json<PollResponse>)> {
    let title = normalize_title(&payload.title)?;
    let options = normalize_option_texts(&payload.options)?;

    let new_poll = Poll::new(title, payload.description, options, admin.id);

    state.store.insert_poll(&new_poll).await?;

    info!(poll_id = %new_poll.id, admin = %admin.username, "Poll created");

    let poll_res = populate_poll(state.store.as_ref(), new_poll).await?;
    Ok((StatusCode::CREATED, Json(poll_res)))
}
