use axum::{extract::State, Json};

use crate::controllers::poll_controllers::models::{populate_polls, PollResponse};
use crate::middleware::guards::AuthUser;
use crate::models::poll_models::PollFilter;
use crate::state::AppState;
use crate::utils::error::AppResult;

/// Closed polls, most recently closed first.
pub async fn get_results(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> AppResult<Json<Vec<PollResponse>>> {
    let closed_polls = state.store.list_polls(PollFilter::Closed).await?;
    Ok(Json(populate_polls(state.store.as_ref(), closed_polls).await?))
}
