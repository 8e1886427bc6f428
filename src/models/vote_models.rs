use serde::{Deserialize, Serialize};
use mongodb::bson::oid::ObjectId;
use chrono::{DateTime, Utc};

/// A user's single choice within one poll. `(poll_id, user_id)` is unique.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Vote {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub poll_id: ObjectId,

    pub user_id: ObjectId,

    pub option_id: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Vote {
    pub fn new(poll_id: ObjectId, user_id: ObjectId, option_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            poll_id,
            user_id,
            option_id: option_id.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
