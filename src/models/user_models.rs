use serde::{Deserialize, Serialize};
use mongodb::bson::oid::ObjectId;
use chrono::{DateTime, Utc};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub discord_id: String,
    pub username: String,
    pub discriminator: Option<String>,
    pub avatar: Option<String>,
    pub is_admin: bool,
    pub in_required_server: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile fields refreshed from Discord on every login.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub discord_id: String,
    pub username: String,
    pub discriminator: Option<String>,
    pub avatar: Option<String>,
    pub is_admin: bool,
    pub in_required_server: bool,
}

impl User {
    pub fn from_profile(profile: UserProfile) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            discord_id: profile.discord_id,
            username: profile.username,
            discriminator: profile.discriminator,
            avatar: profile.avatar,
            is_admin: profile.is_admin,
            in_required_server: profile.in_required_server,
            created_at: now,
            updated_at: now,
        }
    }
}
