use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::controllers::status;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

pub mod auth_routes;
pub mod poll_routes;
pub mod result_routes;
pub mod vote_routes;

fn cors_layer(origin: Option<&str>) -> AppResult<CorsLayer> {
    let allow_origin = match origin {
        Some(origin) => AllowOrigin::exact(origin.parse::<HeaderValue>().map_err(|_| {
            AppError::ConfigError(format!("Failed to parse CORS origin: {}", origin))
        })?),
        None => AllowOrigin::any(),
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]))
}

pub fn build_router(state: AppState) -> AppResult<Router> {
    let cors = cors_layer(state.config.cors_origin.as_deref())?;

    Ok(Router::new()
        .route("/", get(status::root))
        .route("/health-check", get(status::health_check))
        .nest("/api/auth", auth_routes::auth_routes(state.clone()))
        .nest("/api/polls", poll_routes::poll_routes(state.clone()))
        .nest("/api/votes", vote_routes::vote_routes(state.clone()))
        .nest("/api/results", result_routes::result_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}
