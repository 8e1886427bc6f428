use axum::{middleware, routing::{get, post}, Router};

use crate::controllers::auth_controllers::{callback, discord_login, me};
use crate::middleware::jwt::jwt_auth;
use crate::state::AppState;

pub fn auth_routes(state: AppState) -> Router {
    let protected = Router::new()
        .route("/me", get(me::me))
        .route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth));

    Router::new()
        .route("/discord", get(discord_login::discord_login))
        .route("/callback", post(callback::auth_callback))
        .merge(protected)
        .with_state(state)
}
