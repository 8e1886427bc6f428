use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::config::DiscordConfig;
use crate::utils::error::{AppError, AppResult};

pub const DISCORD_API: &str = "https://discord.com/api/v10";
pub const DISCORD_AUTHORIZE_URL: &str = "https://discord.com/api/oauth2/authorize";
const OAUTH_SCOPE: &str = "identify guilds";

#[derive(Debug, Clone, Deserialize)]
pub struct DiscordUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscordGuild {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// The slice of Discord's OAuth and REST API the login flow needs.
#[async_trait]
pub trait DiscordApi: Send + Sync {
    /// Trades an authorization code for a user access token.
    async fn exchange_code(&self, code: &str) -> AppResult<String>;
    async fn current_user(&self, access_token: &str) -> AppResult<DiscordUser>;
    async fn current_user_guilds(&self, access_token: &str) -> AppResult<Vec<DiscordGuild>>;
}

pub fn authorize_url(config: &DiscordConfig) -> AppResult<String> {
    let url = reqwest::Url::parse_with_params(
        DISCORD_AUTHORIZE_URL,
        &[
            ("client_id", config.client_id.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", OAUTH_SCOPE),
        ],
    )
    .map_err(|e| AppError::ConfigError(format!("Invalid Discord authorize URL: {}", e)))?;

    Ok(url.to_string())
}

pub struct DiscordClient {
    http: reqwest::Client,
    config: DiscordConfig,
    api_base: String,
}

impl DiscordClient {
    pub fn new(config: DiscordConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config,
            api_base: DISCORD_API.to_string(),
        })
    }
}

#[async_trait]
impl DiscordApi for DiscordClient {
    #[instrument(skip_all)]
    async fn exchange_code(&self, code: &str) -> AppResult<String> {
        let token = self
            .http
            .post(format!("{}/oauth2/token", self.api_base))
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<TokenResponse>()
            .await?;

        debug!("Discord code exchanged");
        Ok(token.access_token)
    }

    #[instrument(skip_all)]
    async fn current_user(&self, access_token: &str) -> AppResult<DiscordUser> {
        Ok(self
            .http
            .get(format!("{}/users/@me", self.api_base))
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json::<DiscordUser>()
            .await?)
    }

    #[instrument(skip_all)]
    async fn current_user_guilds(&self, access_token: &str) -> AppResult<Vec<DiscordGuild>> {
        Ok(self
            .http
            .get(format!("{}/users/@me/guilds", self.api_base))
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<DiscordGuild>>()
            .await?)
    }
}
