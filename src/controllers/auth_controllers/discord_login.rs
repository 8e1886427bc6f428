use axum::{extract::State, Json};

use crate::controllers::auth_controllers::models::AuthUrlResponse;
use crate::state::AppState;
use crate::utils::{discord::authorize_url, error::AppResult};

pub async fn discord_login(State(state): State<AppState>) -> AppResult<Json<AuthUrlResponse>> {
    let url = authorize_url(&state.config.discord)?;
    Ok(Json(AuthUrlResponse { url }))
}
