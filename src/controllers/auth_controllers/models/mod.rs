use serde::{Deserialize, Serialize};

use crate::models::user_models::User;

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct CallbackRequest {
    pub code: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct AuthUrlResponse {
    pub url: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub avatar: Option<String>,
    pub is_admin: bool,
    pub in_required_server: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_hex(),
            username: user.username.clone(),
            avatar: user.avatar.clone(),
            is_admin: user.is_admin,
            in_required_server: user.in_required_server,
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct MeResponse {
    pub user: UserResponse,
}
