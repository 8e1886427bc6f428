use std::collections::HashMap;

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::db::PollStore;
use crate::models::{
    poll_models::{Poll, PollOption},
    user_models::User,
};
use crate::utils::error::{AppError, AppResult};

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct CreatePollRequest {
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct UpdatePollRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub options: Option<Vec<String>>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CreatorSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PollResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<PollOption>,
    pub is_active: bool,
    /// `None` once the creating user has been removed.
    pub created_by: Option<CreatorSummary>,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub total_votes: u64,
}

impl PollResponse {
    pub fn from_poll(poll: Poll, creator: Option<&User>) -> Self {
        let total_votes = poll.total_votes();
        Self {
            id: poll.id.to_hex(),
            title: poll.title,
            description: poll.description,
            options: poll.options,
            is_active: poll.is_active,
            created_by: creator.map(|user| CreatorSummary {
                id: user.id.to_hex(),
                username: user.username.clone(),
            }),
            closed_at: poll.closed_at,
            created_at: poll.created_at,
            updated_at: poll.updated_at,
            total_votes,
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PollDetailResponse {
    pub poll: PollResponse,
    pub user_vote: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VoterResponse {
    pub username: String,
    pub avatar: Option<String>,
    pub discord_id: String,
    pub voted_at: DateTime<Utc>,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VotersResponse {
    pub option: String,
    pub voter_count: usize,
    pub voters: Vec<VoterResponse>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

pub fn parse_poll_id(raw: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| AppError::BadRequest("Invalid poll id".to_string()))
}

/// Attaches each poll's creator summary, looking creators up in one query.
pub async fn populate_polls(store: &dyn PollStore, polls: Vec<Poll>) -> AppResult<Vec<PollResponse>> {
    let mut creator_ids: Vec<ObjectId> = Vec::new();
    for poll in &polls {
        if !creator_ids.contains(&poll.created_by) {
            creator_ids.push(poll.created_by);
        }
    }

    let creators: HashMap<ObjectId, User> = store
        .find_users(&creator_ids)
        .await?
        .into_iter()
        .map(|user| (user.id, user))
        .collect();

    Ok(polls
        .into_iter()
        .map(|poll| {
            let creator = creators.get(&poll.created_by);
            PollResponse::from_poll(poll, creator)
        })
        .collect())
}

pub async fn populate_poll(store: &dyn PollStore, poll: Poll) -> AppResult<PollResponse> {
    populate_polls(store, vec![poll])
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::InternalError("Poll vanished while populating".to_string()))
}
