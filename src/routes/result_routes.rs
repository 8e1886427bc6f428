use axum::{middleware, routing::get, Router};

use crate::controllers::result_controllers::get_results;
use crate::middleware::jwt::jwt_auth;
use crate::state::AppState;

pub fn result_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_results::get_results))
        .route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth))
        .with_state(state)
}
