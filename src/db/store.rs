use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;

use crate::models::{
    poll_models::{Poll, PollFilter},
    user_models::{User, UserProfile},
    vote_models::Vote,
};
use crate::utils::error::AppResult;

/// Document store operations used by the handlers.
///
/// Every method is a single-document (or single-collection) read or write.
/// Nothing here spans collections atomically; callers that touch both a
/// vote and a poll counter do so in two steps.
#[async_trait]
pub trait PollStore: Send + Sync {
    /// Creates the user on first login, otherwise refreshes its profile.
    async fn upsert_user(&self, profile: UserProfile) -> AppResult<User>;
    async fn find_user(&self, user_id: ObjectId) -> AppResult<Option<User>>;
    async fn find_users(&self, user_ids: &[ObjectId]) -> AppResult<Vec<User>>;

    async fn insert_poll(&self, poll: &Poll) -> AppResult<()>;
    async fn find_poll(&self, poll_id: ObjectId) -> AppResult<Option<Poll>>;
    /// `Closed` sorts by `closed_at` descending, the rest by `created_at` descending.
    async fn list_polls(&self, filter: PollFilter) -> AppResult<Vec<Poll>>;
    /// Overwrites title, description, options and `updated_at`.
    async fn replace_poll(&self, poll: &Poll) -> AppResult<()>;
    async fn set_poll_status(
        &self,
        poll_id: ObjectId,
        is_active: bool,
        closed_at: Option<DateTime<Utc>>,
    ) -> AppResult<Option<Poll>>;
    async fn delete_poll(&self, poll_id: ObjectId) -> AppResult<bool>;

    /// Adds one to the option's counter. Returns false when no option matched.
    async fn increment_option(&self, poll_id: ObjectId, option_id: &str) -> AppResult<bool>;
    /// Subtracts one from the option's counter unless it is already zero.
    async fn decrement_option(&self, poll_id: ObjectId, option_id: &str) -> AppResult<bool>;

    async fn find_vote(&self, poll_id: ObjectId, user_id: ObjectId) -> AppResult<Option<Vote>>;
    /// Fails with `AppError::Conflict` if the user already has a vote on the poll.
    async fn insert_vote(&self, vote: &Vote) -> AppResult<()>;
    async fn update_vote_option(&self, vote_id: ObjectId, option_id: &str) -> AppResult<()>;
    async fn votes_for_poll(&self, poll_id: ObjectId) -> AppResult<Vec<Vote>>;
    async fn votes_for_option(&self, poll_id: ObjectId, option_id: &str) -> AppResult<Vec<Vote>>;
    async fn delete_votes_for_poll(&self, poll_id: ObjectId) -> AppResult<u64>;
    /// Deletes the poll's votes whose option is not in `valid_option_ids`.
    async fn delete_orphaned_votes(
        &self,
        poll_id: ObjectId,
        valid_option_ids: &[String],
    ) -> AppResult<u64>;
}
