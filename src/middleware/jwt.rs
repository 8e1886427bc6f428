use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use mongodb::bson::oid::ObjectId;
use tracing::debug;

use crate::models::user_models::User;
use crate::state::AppState;
use crate::utils::{error::AppError, session::verify_token};

/// The user resolved from the bearer token, stored as a request extension.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

pub async fn jwt_auth(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer
        .ok_or_else(|| AppError::AuthenticationError("Access token required".to_string()))?;

    let claims = verify_token(bearer.token(), &state.config.jwt_secret)?;

    let user_id = ObjectId::parse_str(&claims.sub)
        .map_err(|_| AppError::AuthenticationError("Invalid or expired token".to_string()))?;

    let user = state
        .store
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::AuthenticationError("User not found".to_string()))?;

    debug!(user_id = %user.id, username = %user.username, "Request authenticated");

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}
