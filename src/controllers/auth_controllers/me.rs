use axum::Json;

use crate::controllers::auth_controllers::models::{MeResponse, UserResponse};
use crate::middleware::guards::AuthUser;

pub async fn me(AuthUser(user): AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        user: UserResponse::from(&user),
    })
}
