use axum::{extract::State, Json};
use tracing::instrument;

use crate::controllers::poll_controllers::models::{populate_polls, PollResponse};
use crate::middleware::guards::{AuthUser, ServerMember};
use crate::models::poll_models::PollFilter;
use crate::state::AppState;
use crate::utils::error::AppResult;

#[instrument(skip_all)]
pub async fn get_all_polls(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> AppResult<Json<Vec<PollResponse>>> {
    let polls = state.store.list_polls(PollFilter::All).await?;
    Ok(Json(populate_polls(state.store.as_ref(), polls).await?))
}

#[instrument(skip_all)]
pub async fn get_active_polls(
    State(state): State<AppState>,
    ServerMember(_user): ServerMember,
) -> AppResult<Json<Vec<PollResponse>>> {
    let polls = state.store.list_polls(PollFilter::Active).await?;
    Ok(Json(populate_polls(state.store.as_ref(), polls).await?))
}
