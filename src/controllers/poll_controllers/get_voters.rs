use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    Json,
};
use mongodb::bson::oid::ObjectId;

use crate::controllers::poll_controllers::models::{parse_poll_id, VoterResponse, VotersResponse};
use crate::middleware::guards::AuthUser;
use crate::models::user_models::User;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

pub async fn get_option_voters(
    Path((poll_id, option_id)): Path<(String, String)>,
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> AppResult<Json<VotersResponse>> {
    let poll_id = parse_poll_id(&poll_id)?;

    let poll = state
        .store
        .find_poll(poll_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    let option = poll
        .option(&option_id)
        .ok_or_else(|| AppError::NotFound("Option not found".to_string()))?;

    let votes = state.store.votes_for_option(poll_id, &option_id).await?;

    let user_ids: Vec<ObjectId> = votes.iter().map(|vote| vote.user_id).collect();
    let users: HashMap<ObjectId, User> = state
        .store
        .find_users(&user_ids)
        .await?
        .into_iter()
        .map(|user| (user.id, user))
        .collect();

    let voters: Vec<VoterResponse> = votes
        .iter()
        .filter_map(|vote| {
            users.get(&vote.user_id).map(|user| VoterResponse {
                username: user.username.clone(),
                avatar: user.avatar.clone(),
                discord_id: user.discord_id.clone(),
                voted_at: vote.created_at,
            })
        })
        .collect();

    Ok(Json(VotersResponse {
        option: option.text.clone(),
        voter_count: voters.len(),
        voters,
    }))
}
