use serde::{Deserialize, Serialize};

use crate::controllers::poll_controllers::models::PollResponse;

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitVoteRequest {
    pub option_id: String,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVoteResponse {
    pub poll: PollResponse,
    pub user_vote: String,
}
