use axum::{
    extract::{Path, State},
    Json,
};
use mongodb::bson::oid::ObjectId;
use tracing::{info, instrument, warn};

use crate::controllers::poll_controllers::models::{parse_poll_id, populate_poll};
use crate::controllers::vote_controllers::models::{SubmitVoteRequest, SubmitVoteResponse};
use crate::db::PollStore;
use crate::middleware::guards::ServerMember;
use crate::models::{poll_models::Poll, vote_models::Vote};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use crate::utils::extract::AppJson;

pub async fn submit_vote(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    ServerMember(user): ServerMember,
    AppJson(payload): AppJson<SubmitVoteRequest>,
) -> AppResult<Json<SubmitVoteResponse>> {
    let poll_id = parse_poll_id(&poll_id)?;

    let poll = record_vote(state.store.as_ref(), poll_id, user.id, &payload.option_id).await?;

    Ok(Json(SubmitVoteResponse {
        poll: populate_poll(state.store.as_ref(), poll).await?,
        user_vote: payload.option_id,
    }))
}

/// Records `user_id`'s choice on a poll and returns the poll as stored afterwards.
///
/// The vote row is written before the counters. The two writes are not
/// atomic: a failure in between leaves counters out of step with vote rows
/// until the poll's options are next updated.
#[instrument(skip(store))]
pub async fn record_vote(
    store: &dyn PollStore,
    poll_id: ObjectId,
    user_id: ObjectId,
    option_id: &str,
) -> AppResult<Poll> {
    let poll = store
        .find_poll(poll_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    if !poll.is_active {
        return Err(AppError::BadRequest("Poll is closed".to_string()));
    }

    if poll.option(option_id).is_none() {
        return Err(AppError::BadRequest("Invalid option".to_string()));
    }

    match store.find_vote(poll_id, user_id).await? {
        Some(existing) if existing.option_id == option_id => {
            return Ok(poll);
        }
        Some(existing) => {
            store.update_vote_option(existing.id, option_id).await?;

            if !store.decrement_option(poll_id, &existing.option_id).await? {
                warn!(old_option = %existing.option_id, "Previous option had no counter to decrement");
            }
            store.increment_option(poll_id, option_id).await?;

            info!(from = %existing.option_id, to = %option_id, "Vote changed");
        }
        None => {
            store.insert_vote(&Vote::new(poll_id, user_id, option_id)).await?;
            store.increment_option(poll_id, option_id).await?;

            info!("Vote recorded");
        }
    }

    store
        .find_poll(poll_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))
}
