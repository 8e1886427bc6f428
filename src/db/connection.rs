use mongodb::{bson::doc, options::ClientOptions, Client, Database};
use tracing::info;

use crate::config::AppConfig;
use crate::utils::error::{AppError, AppResult};

pub async fn init_db(config: &AppConfig) -> AppResult<Database> {
    let mut client_options = ClientOptions::parse(&config.mongodb_uri)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to parse MongoDB URI: {}", e)))?;

    client_options.app_name = Some("DiscordPolls".to_string());

    let client = Client::with_options(client_options)
        .map_err(|e| AppError::DatabaseError(format!("Failed to initialize MongoDB client: {}", e)))?;

    let db = client.database(&config.db_name);

    db.run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| AppError::DatabaseError(format!("MongoDB ping failed: {}", e)))?;

    info!(db_name = %config.db_name, "Connected to MongoDB");

    Ok(db)
}
