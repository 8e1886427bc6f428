use std::{net::SocketAddr, sync::Arc};

use once_cell::sync::Lazy;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use discord_poll_backend::{
    build_router,
    config::AppConfig,
    controllers::status::START_TIME,
    db::{connection::init_db, MongoStore},
    utils::discord::DiscordClient,
    AppState,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();
    Lazy::force(&START_TIME);

    let config = match AppConfig::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let database = match init_db(&config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let store = MongoStore::new(&database);
    if let Err(e) = store.ensure_indexes().await {
        error!("Failed to create indexes: {}", e);
        std::process::exit(1);
    }

    let discord = match DiscordClient::new(config.discord.clone()) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to initialize Discord client: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = AppState::new(Arc::new(store), Arc::new(discord), config.clone());

    let app = match build_router(app_state) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to build router: {}", e);
            std::process::exit(1);
        }
    };

    let addr: SocketAddr = match config.server_addr.parse() {
        Ok(addr) => addr,
        Err(_) => {
            error!("Failed to parse SERVER_ADDR: {}", config.server_addr);
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to address {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!(%addr, cors_origin = ?config.cors_origin, "Server running");

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
