use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use tracing::{info, instrument};

use crate::controllers::poll_controllers::models::{
    parse_poll_id, populate_poll, PollResponse, UpdatePollRequest,
};
use crate::middleware::guards::AdminUser;
use crate::models::poll_models::{normalize_option_texts, normalize_title};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::extract::AppJson;

/// Edits a poll in place.
///
/// A new option list keeps the id (and therefore the votes) of any existing
/// option whose text matches ignoring case. Counters are rebuilt from the
/// vote rows and votes for dropped options are deleted.
#[instrument(skip_all)]
pub async fn update_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    AppJson(payload): AppJson<UpdatePollRequest>,
) -> AppResult<Json<PollResponse>> {
    let poll_id = parse_poll_id(&poll_id)?;

    let mut poll = state
        .store
        .find_poll(poll_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    if let Some(title) = payload.title.as_deref() {
        poll.title = normalize_title(title)?;
    }

    if payload.description.is_some() {
        poll.description = payload.description;
    }

    if let Some(options) = payload.options.as_deref() {
        let texts = normalize_option_texts(options)?;
        let votes = state.store.votes_for_poll(poll_id).await?;

        poll.options = poll.remap_options(&texts, &votes);

        let valid_ids: Vec<String> = poll.options.iter().map(|opt| opt.id.clone()).collect();
        let removed = state.store.delete_orphaned_votes(poll_id, &valid_ids).await?;
        if removed > 0 {
            info!(poll_id = %poll_id, removed, "Deleted votes for removed options");
        }
    }

    poll.updated_at = Utc::now();
    state.store.replace_poll(&poll).await?;
    info!(poll_id = %poll_id, admin = %admin.username, "Poll updated");

    let updated_poll = state
        .store
        .find_poll(poll_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    Ok(Json(populate_poll(state.store.as_ref(), updated_poll).await?))
}
