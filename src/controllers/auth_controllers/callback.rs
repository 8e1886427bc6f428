use axum::{extract::State, Json};
use tracing::{info, warn};

use crate::controllers::auth_controllers::models::{AuthResponse, CallbackRequest, UserResponse};
use crate::models::user_models::UserProfile;
use crate::state::AppState;
use crate::utils::{
    error::{AppError, AppResult},
    extract::AppJson,
    session,
};

/// Finishes the Discord OAuth flow.
///
/// Admin and server-membership flags are recomputed from Discord on every
/// login, so leaving the guild revokes voting rights at the next sign-in.
pub async fn auth_callback(
    State(state): State<AppState>,
    AppJson(body): AppJson<CallbackRequest>,
) -> AppResult<Json<AuthResponse>> {
    let code = body.code.trim();
    if code.is_empty() {
        return Err(AppError::ValidationError("Authorization code is required".to_string()));
    }

    let profile = fetch_profile(&state, code)
        .await
        .map_err(|e| {
            warn!(error = %e, "Discord authentication failed");
            AppError::AuthenticationError("Authentication failed".to_string())
        })?;

    let user = state.store.upsert_user(profile).await?;

    let token = session::create_token(&user.id.to_hex(), &state.config.jwt_secret)
        .map_err(|e| AppError::InternalError(format!("Failed to create session token: {}", e)))?;

    info!(
        user_id = %user.id,
        username = %user.username,
        is_admin = user.is_admin,
        in_required_server = user.in_required_server,
        "User logged in"
    );

    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(&user),
    }))
}

async fn fetch_profile(state: &AppState, code: &str) -> AppResult<UserProfile> {
    let discord = state.discord.as_ref();
    let access_token = discord.exchange_code(code).await?;
    let discord_user = discord.current_user(&access_token).await?;
    let guilds = discord.current_user_guilds(&access_token).await?;

    let settings = &state.config.discord;
    let in_required_server = guilds
        .iter()
        .any(|guild| guild.id == settings.required_server_id);

    Ok(UserProfile {
        is_admin: settings.is_admin(&discord_user.id),
        in_required_server,
        discord_id: discord_user.id,
        username: discord_user.username,
        discriminator: discord_user.discriminator,
        avatar: discord_user.avatar,
    })
}
