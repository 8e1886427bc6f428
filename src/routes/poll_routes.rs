use axum::{middleware, routing::{get, post}, Router};

use crate::controllers::poll_controllers::{
    close_poll, create_poll, delete_poll, get_poll, get_voters, polls, update_poll,
};
use crate::middleware::jwt::jwt_auth;
use crate::state::AppState;

pub fn poll_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(polls::get_all_polls).post(create_poll::create_poll))
        .route("/active", get(polls::get_active_polls))
        .route(
            "/:poll_id",
            get(get_poll::get_poll)
                .put(update_poll::update_poll)
                .delete(delete_poll::delete_poll),
        )
        .route("/:poll_id/close", post(close_poll::close_poll))
        .route("/:poll_id/reopen", post(close_poll::reopen_poll))
        .route(
            "/:poll_id/options/:option_id/voters",
            get(get_voters::get_option_voters),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth))
        .with_state(state)
}
