//! Runtime configuration read from the process environment.

use crate::utils::error::{AppError, AppResult};

const DEFAULT_DB_NAME: &str = "discord_polls";
const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:5000";

/// Discord application credentials and guild gating settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscordConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Guild a user must belong to before they may vote.
    pub required_server_id: String,
    /// Discord user ids granted admin rights at login.
    pub admin_discord_ids: Vec<String>,
}

impl DiscordConfig {
    pub fn is_admin(&self, discord_id: &str) -> bool {
        self.admin_discord_ids.iter().any(|id| id == discord_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub mongodb_uri: String,
    pub db_name: String,
    pub jwt_secret: String,
    pub server_addr: String,
    /// `None` allows any origin.
    pub cors_origin: Option<String>,
    pub discord: DiscordConfig,
}

impl AppConfig {
    /// Create config from environment variables
    ///
    /// Reads:
    /// - `MONGODB_URI` (required)
    /// - `DB_NAME` (default: "discord_polls")
    /// - `JWT_SECRET` (required)
    /// - `DISCORD_CLIENT_ID`, `DISCORD_CLIENT_SECRET`, `DISCORD_REDIRECT_URI` (required)
    /// - `REQUIRED_SERVER_ID` (required)
    /// - `ADMIN_DISCORD_ID` (optional, comma-separated)
    /// - `SERVER_ADDR` (default: "0.0.0.0:5000")
    /// - `CORS_ORIGIN` (optional)
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| AppError::ConfigError(format!("{} must be set", key)))
        };

        let admin_discord_ids = lookup("ADMIN_DISCORD_ID")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            mongodb_uri: required("MONGODB_URI")?,
            db_name: lookup("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
            jwt_secret: required("JWT_SECRET")?,
            server_addr: lookup("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string()),
            cors_origin: lookup("CORS_ORIGIN").filter(|origin| origin != "*"),
            discord: DiscordConfig {
                client_id: required("DISCORD_CLIENT_ID")?,
                client_secret: required("DISCORD_CLIENT_SECRET")?,
                redirect_uri: required("DISCORD_REDIRECT_URI")?,
                required_server_id: required("REQUIRED_SERVER_ID")?,
                admin_discord_ids,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("MONGODB_URI", "mongodb://localhost:27017"),
            ("JWT_SECRET", "secret"),
            ("DISCORD_CLIENT_ID", "client"),
            ("DISCORD_CLIENT_SECRET", "shh"),
            ("DISCORD_REDIRECT_URI", "http://localhost:3000/auth/callback"),
            ("REQUIRED_SERVER_ID", "guild-1"),
        ])
    }

    #[test]
    fn defaults_fill_optional_values() {
        let vars = base_vars();
        let config = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.db_name, "discord_polls");
        assert_eq!(config.server_addr, "0.0.0.0:5000");
        assert_eq!(config.cors_origin, None);
        assert!(config.discord.admin_discord_ids.is_empty());
    }

    #[test]
    fn admin_ids_are_split_on_commas() {
        let mut vars = base_vars();
        vars.insert("ADMIN_DISCORD_ID", "111, 222,,333");
        let config = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert!(config.discord.is_admin("222"));
        assert!(config.discord.is_admin("333"));
        assert!(!config.discord.is_admin(""));
    }

    #[test]
    fn missing_secret_is_an_error() {
        let mut vars = base_vars();
        vars.remove("JWT_SECRET");
        let err = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap_err();

        assert!(matches!(err, AppError::ConfigError(msg) if msg.contains("JWT_SECRET")));
    }

    #[test]
    fn wildcard_cors_origin_means_any() {
        let mut vars = base_vars();
        vars.insert("CORS_ORIGIN", "*");
        let config = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.cors_origin, None);
    }
}
