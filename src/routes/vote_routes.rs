use axum::{middleware, routing::post, Router};

use crate::controllers::vote_controllers::submit_vote;
use crate::middleware::jwt::jwt_auth;
use crate::state::AppState;

pub fn vote_routes(state: AppState) -> Router {
    Router::new()
        .route("/:poll_id", post(submit_vote::submit_vote))
        .route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth))
        .with_state(state)
}
