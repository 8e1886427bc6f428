use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use tokio::sync::Mutex;

use crate::db::store::PollStore;
use crate::models::{
    poll_models::{Poll, PollFilter},
    user_models::{User, UserProfile},
    vote_models::Vote,
};
use crate::utils::error::{AppError, AppResult};

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    polls: Vec<Poll>,
    votes: Vec<Vote>,
}

/// In-process store with the same uniqueness rules as the MongoDB indexes.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn vote_count(&self, poll_id: ObjectId) -> usize {
        let inner = self.inner.lock().await;
        inner.votes.iter().filter(|v| v.poll_id == poll_id).count()
    }
}

#[async_trait]
impl PollStore for MemoryStore {
    async fn upsert_user(&self, profile: UserProfile) -> AppResult<User> {
        let mut inner = self.inner.lock().await;

        if let Some(user) = inner
            .users
            .iter_mut()
            .find(|u| u.discord_id == profile.discord_id)
        {
            user.username = profile.username;
            user.discriminator = profile.discriminator;
            user.avatar = profile.avatar;
            user.is_admin = profile.is_admin;
            user.in_required_server = profile.in_required_server;
            user.updated_at = Utc::now();
            return Ok(user.clone());
        }

        let user = User::from_profile(profile);
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, user_id: ObjectId) -> AppResult<Option<User>> {
        let inner = self.inner.lock().await;
        Ok(inner.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn find_users(&self, user_ids: &[ObjectId]) -> AppResult<Vec<User>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .users
            .iter()
            .filter(|u| user_ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn insert_poll(&self, poll: &Poll) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        if inner.polls.iter().any(|p| p.id == poll.id) {
            return Err(AppError::Conflict("Poll already exists".to_string()));
        }
        inner.polls.push(poll.clone());
        Ok(())
    }

    async fn find_poll(&self, poll_id: ObjectId) -> AppResult<Option<Poll>> {
        let inner = self.inner.lock().await;
        Ok(inner.polls.iter().find(|p| p.id == poll_id).cloned())
    }

    async fn list_polls(&self, filter: PollFilter) -> AppResult<Vec<Poll>> {
        let inner = self.inner.lock().await;
        let mut polls: Vec<Poll> = inner
            .polls
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        match filter {
            PollFilter::Closed => polls.sort_by(|a, b| b.closed_at.cmp(&a.closed_at)),
            PollFilter::All | PollFilter::Active => {
                polls.sort_by(|a, b| b.created_at.cmp(&a.created_at))
            }
        }
        Ok(polls)
    }

    async fn replace_poll(&self, poll: &Poll) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        if let Some(existing) = inner.polls.iter_mut().find(|p| p.id == poll.id) {
            existing.title = poll.title.clone();
            existing.description = poll.description.clone();
            existing.options = poll.options.clone();
            existing.updated_at = poll.updated_at;
        }
        Ok(())
    }

    async fn set_poll_status(
        &self,
        poll_id: ObjectId,
        is_active: bool,
        closed_at: Option<DateTime<Utc>>,
    ) -> AppResult<Option<Poll>> {
        let mut inner = self.inner.lock().await;
        Ok(inner.polls.iter_mut().find(|p| p.id == poll_id).map(|poll| {
            poll.is_active = is_active;
            poll.closed_at = closed_at;
            poll.updated_at = Utc::now();
            poll.clone()
        }))
    }

    async fn delete_poll(&self, poll_id: ObjectId) -> AppResult<bool> {
        let mut inner = self.inner.lock().await;
        let before = inner.polls.len();
        inner.polls.retain(|p| p.id != poll_id);
        Ok(inner.polls.len() < before)
    }

    async fn increment_option(&self, poll_id: ObjectId, option_id: &str) -> AppResult<bool> {
        let mut inner = self.inner.lock().await;
        let option = inner
            .polls
            .iter_mut()
            .find(|p| p.id == poll_id)
            .and_then(|p| p.options.iter_mut().find(|o| o.id == option_id));

        Ok(match option {
            Some(option) => {
                option.votes += 1;
                true
            }
            None => false,
        })
    }

    async fn decrement_option(&self, poll_id: ObjectId, option_id: &str) -> AppResult<bool> {
        let mut inner = self.inner.lock().await;
        let option = inner
            .polls
            .iter_mut()
            .find(|p| p.id == poll_id)
            .and_then(|p| p.options.iter_mut().find(|o| o.id == option_id && o.votes > 0));

        Ok(match option {
            Some(option) => {
                option.votes -= 1;
                true
            }
            None => false,
        })
    }

    async fn find_vote(&self, poll_id: ObjectId, user_id: ObjectId) -> AppResult<Option<Vote>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .votes
            .iter()
            .find(|v| v.poll_id == poll_id && v.user_id == user_id)
            .cloned())
    }

    async fn insert_vote(&self, vote: &Vote) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        if inner
            .votes
            .iter()
            .any(|v| v.poll_id == vote.poll_id && v.user_id == vote.user_id)
        {
            return Err(AppError::Conflict(
                "You have already voted on this poll".to_string(),
            ));
        }
        inner.votes.push(vote.clone());
        Ok(())
    }

    async fn update_vote_option(&self, vote_id: ObjectId, option_id: &str) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        if let Some(vote) = inner.votes.iter_mut().find(|v| v.id == vote_id) {
            vote.option_id = option_id.to_string();
            vote.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn votes_for_poll(&self, poll_id: ObjectId) -> AppResult<Vec<Vote>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .votes
            .iter()
            .filter(|v| v.poll_id == poll_id)
            .cloned()
            .collect())
    }

    async fn votes_for_option(&self, poll_id: ObjectId, option_id: &str) -> AppResult<Vec<Vote>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .votes
            .iter()
            .filter(|v| v.poll_id == poll_id && v.option_id == option_id)
            .cloned()
            .collect())
    }

    async fn delete_votes_for_poll(&self, poll_id: ObjectId) -> AppResult<u64> {
        let mut inner = self.inner.lock().await;
        let before = inner.votes.len();
        inner.votes.retain(|v| v.poll_id != poll_id);
        Ok((before - inner.votes.len()) as u64)
    }

    async fn delete_orphaned_votes(
        &self,
        poll_id: ObjectId,
        valid_option_ids: &[String],
    ) -> AppResult<u64> {
        let mut inner = self.inner.lock().await;
        let before = inner.votes.len();
        inner
            .votes
            .retain(|v| v.poll_id != poll_id || valid_option_ids.contains(&v.option_id));
        Ok((before - inner.votes.len()) as u64)
    }
}
