//! Per-route authorization checks.
//!
//! Each extractor reads the [`CurrentUser`] placed by [`jwt_auth`] and
//! rejects the request when the required flag is missing, so routes compose
//! checks simply by naming the extractor in the handler signature.
//!
//! [`jwt_auth`]: crate::middleware::jwt::jwt_auth

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::middleware::jwt::CurrentUser;
use crate::models::user_models::User;
use crate::utils::error::AppError;

/// Any authenticated user.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// An authenticated user with `is_admin`.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

/// An authenticated user who belongs to the required Discord server.
#[derive(Debug, Clone)]
pub struct ServerMember(pub User);

fn current_user(parts: &Parts) -> Result<User, AppError> {
    parts
        .extensions
        .get::<CurrentUser>()
        .map(|current| current.0.clone())
        .ok_or_else(|| AppError::AuthenticationError("Access token required".to_string()))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_user(parts).map(AuthUser)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts)?;
        if !user.is_admin {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }
        Ok(AdminUser(user))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ServerMember
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts)?;
        if !user.in_required_server {
            return Err(AppError::Forbidden(
                "You must be a member of the required Discord server".to_string(),
            ));
        }
        Ok(ServerMember(user))
    }
}
