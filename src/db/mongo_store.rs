use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, to_bson, Bson},
    error::{ErrorKind, WriteError, WriteFailure},
    options::{IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use tracing::{debug, info, instrument};

use crate::db::store::PollStore;
use crate::models::{
    poll_models::{Poll, PollFilter},
    user_models::{User, UserProfile},
    vote_models::Vote,
};
use crate::utils::error::{AppError, AppResult};

const DUPLICATE_KEY: i32 = 11000;

#[derive(Clone)]
pub struct MongoStore {
    users: Collection<User>,
    polls: Collection<Poll>,
    votes: Collection<Vote>,
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(WriteError { code: DUPLICATE_KEY, .. }))
    )
}

fn now_bson() -> AppResult<Bson> {
    Ok(to_bson(&Utc::now())?)
}

impl MongoStore {
    pub fn new(db: &Database) -> Self {
        Self {
            users: db.collection::<User>("users"),
            polls: db.collection::<Poll>("polls"),
            votes: db.collection::<Vote>("votes"),
        }
    }

    /// One vote per user per poll, one user per Discord account.
    pub async fn ensure_indexes(&self) -> AppResult<()> {
        self.votes
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "poll_id": 1, "user_id": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
            )
            .await?;

        self.users
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "discord_id": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
            )
            .await?;

        info!("Indexes ensured on users and votes");
        Ok(())
    }
}

#[async_trait]
impl PollStore for MongoStore {
    #[instrument(skip(self, profile), fields(discord_id = %profile.discord_id))]
    async fn upsert_user(&self, profile: UserProfile) -> AppResult<User> {
        let now = now_bson()?;

        let user = self
            .users
            .find_one_and_update(
                doc! { "discord_id": &profile.discord_id },
                doc! {
                    "$set": {
                        "username": profile.username,
                        "discriminator": profile.discriminator,
                        "avatar": profile.avatar,
                        "is_admin": profile.is_admin,
                        "in_required_server": profile.in_required_server,
                        "updated_at": now.clone(),
                    },
                    "$setOnInsert": {
                        "_id": ObjectId::new(),
                        "created_at": now,
                    }
                },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::InternalError("Upsert returned no user".to_string()))?;

        debug!(user_id = %user.id, "User upserted");
        Ok(user)
    }

    async fn find_user(&self, user_id: ObjectId) -> AppResult<Option<User>> {
        Ok(self.users.find_one(doc! { "_id": user_id }).await?)
    }

    async fn find_users(&self, user_ids: &[ObjectId]) -> AppResult<Vec<User>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self
            .users
            .find(doc! { "_id": { "$in": user_ids.to_vec() } })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, poll), fields(poll_id = %poll.id))]
    async fn insert_poll(&self, poll: &Poll) -> AppResult<()> {
        self.polls.insert_one(poll).await?;
        Ok(())
    }

    async fn find_poll(&self, poll_id: ObjectId) -> AppResult<Option<Poll>> {
        Ok(self.polls.find_one(doc! { "_id": poll_id }).await?)
    }

    #[instrument(skip(self))]
    async fn list_polls(&self, filter: PollFilter) -> AppResult<Vec<Poll>> {
        let (query, sort) = match filter {
            PollFilter::All => (doc! {}, doc! { "created_at": -1 }),
            PollFilter::Active => (doc! { "is_active": true }, doc! { "created_at": -1 }),
            PollFilter::Closed => (doc! { "is_active": false }, doc! { "closed_at": -1 }),
        };

        let cursor = self.polls.find(query).sort(sort).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, poll), fields(poll_id = %poll.id))]
    async fn replace_poll(&self, poll: &Poll) -> AppResult<()> {
        self.polls
            .update_one(
                doc! { "_id": poll.id },
                doc! {
                    "$set": {
                        "title": &poll.title,
                        "description": poll.description.clone(),
                        "options": to_bson(&poll.options)?,
                        "updated_at": to_bson(&poll.updated_at)?,
                    }
                },
            )
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_poll_status(
        &self,
        poll_id: ObjectId,
        is_active: bool,
        closed_at: Option<DateTime<Utc>>,
    ) -> AppResult<Option<Poll>> {
        let poll = self
            .polls
            .find_one_and_update(
                doc! { "_id": poll_id },
                doc! {
                    "$set": {
                        "is_active": is_active,
                        "closed_at": to_bson(&closed_at)?,
                        "updated_at": now_bson()?,
                    }
                },
            )
            .return_document(ReturnDocument::After)
            .await?;
        Ok(poll)
    }

    #[instrument(skip(self))]
    async fn delete_poll(&self, poll_id: ObjectId) -> AppResult<bool> {
        let result = self.polls.delete_one(doc! { "_id": poll_id }).await?;
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn increment_option(&self, poll_id: ObjectId, option_id: &str) -> AppResult<bool> {
        let result = self
            .polls
            .update_one(
                doc! { "_id": poll_id, "options.id": option_id },
                doc! {
                    "$inc": { "options.$.votes": 1 },
                    "$set": { "updated_at": now_bson()? }
                },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self))]
    async fn decrement_option(&self, poll_id: ObjectId, option_id: &str) -> AppResult<bool> {
        let result = self
            .polls
            .update_one(
                doc! {
                    "_id": poll_id,
                    "options": { "$elemMatch": { "id": option_id, "votes": { "$gt": 0 } } }
                },
                doc! {
                    "$inc": { "options.$.votes": -1 },
                    "$set": { "updated_at": now_bson()? }
                },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn find_vote(&self, poll_id: ObjectId, user_id: ObjectId) -> AppResult<Option<Vote>> {
        Ok(self
            .votes
            .find_one(doc! { "poll_id": poll_id, "user_id": user_id })
            .await?)
    }

    #[instrument(skip(self, vote), fields(poll_id = %vote.poll_id, user_id = %vote.user_id))]
    async fn insert_vote(&self, vote: &Vote) -> AppResult<()> {
        match self.votes.insert_one(vote).await {
            Ok(_) => Ok(()),
            Err(err) if is_duplicate_key(&err) => Err(AppError::Conflict(
                "You have already voted on this poll".to_string(),
            )),
            Err(err) => Err(err.into()),
        }
    }

    #[instrument(skip(self))]
    async fn update_vote_option(&self, vote_id: ObjectId, option_id: &str) -> AppResult<()> {
        self.votes
            .update_one(
                doc! { "_id": vote_id },
                doc! { "$set": { "option_id": option_id, "updated_at": now_bson()? } },
            )
            .await?;
        Ok(())
    }

    async fn votes_for_poll(&self, poll_id: ObjectId) -> AppResult<Vec<Vote>> {
        let cursor = self
            .votes
            .find(doc! { "poll_id": poll_id })
            .sort(doc! { "created_at": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn votes_for_option(&self, poll_id: ObjectId, option_id: &str) -> AppResult<Vec<Vote>> {
        let cursor = self
            .votes
            .find(doc! { "poll_id": poll_id, "option_id": option_id })
            .sort(doc! { "created_at": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn delete_votes_for_poll(&self, poll_id: ObjectId) -> AppResult<u64> {
        let result = self.votes.delete_many(doc! { "poll_id": poll_id }).await?;
        Ok(result.deleted_count)
    }

    #[instrument(skip(self))]
    async fn delete_orphaned_votes(
        &self,
        poll_id: ObjectId,
        valid_option_ids: &[String],
    ) -> AppResult<u64> {
        let result = self
            .votes
            .delete_many(doc! {
                "poll_id": poll_id,
                "option_id": { "$nin": valid_option_ids.to_vec() }
            })
            .await?;
        Ok(result.deleted_count)
    }
}
