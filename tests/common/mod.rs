#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use discord_poll_backend::{
    build_router,
    config::{AppConfig, DiscordConfig},
    models::user_models::{User, UserProfile},
    utils::{
        discord::{DiscordApi, DiscordGuild, DiscordUser},
        error::{AppError, AppResult},
        session::create_token,
    },
    AppState, MemoryStore, PollStore,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const REQUIRED_GUILD: &str = "guild-1";
pub const ADMIN_DISCORD_ID: &str = "admin-1";
pub const JWT_SECRET: &str = "test-secret";

pub fn test_config() -> AppConfig {
    AppConfig {
        mongodb_uri: "mongodb://localhost:27017".to_string(),
        db_name: "discord_polls_test".to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        server_addr: "127.0.0.1:0".to_string(),
        cors_origin: None,
        discord: DiscordConfig {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            redirect_uri: "http://localhost:3000/auth/callback".to_string(),
            required_server_id: REQUIRED_GUILD.to_string(),
            admin_discord_ids: vec![ADMIN_DISCORD_ID.to_string()],
        },
    }
}

/// Discord stand-in whose identity and guild list can be changed between logins.
pub struct MockDiscord {
    user: Mutex<DiscordUser>,
    guilds: Mutex<Vec<DiscordGuild>>,
    fail: Mutex<bool>,
}

impl MockDiscord {
    pub fn new(discord_id: &str, username: &str, guild_ids: &[&str]) -> Self {
        Self {
            user: Mutex::new(DiscordUser {
                id: discord_id.to_string(),
                username: username.to_string(),
                discriminator: None,
                avatar: Some("avatarhash".to_string()),
            }),
            guilds: Mutex::new(
                guild_ids
                    .iter()
                    .map(|id| DiscordGuild {
                        id: id.to_string(),
                        name: format!("Guild {}", id),
                    })
                    .collect(),
            ),
            fail: Mutex::new(false),
        }
    }

    pub fn set_guilds(&self, guild_ids: &[&str]) {
        *self.guilds.lock().unwrap() = guild_ids
            .iter()
            .map(|id| DiscordGuild {
                id: id.to_string(),
                name: String::new(),
            })
            .collect();
    }

    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    fn check(&self) -> AppResult<()> {
        if *self.fail.lock().unwrap() {
            return Err(AppError::UpstreamError("invalid_grant".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DiscordApi for MockDiscord {
    async fn exchange_code(&self, code: &str) -> AppResult<String> {
        self.check()?;
        Ok(format!("access-{}", code))
    }

    async fn current_user(&self, _access_token: &str) -> AppResult<DiscordUser> {
        self.check()?;
        Ok(self.user.lock().unwrap().clone())
    }

    async fn current_user_guilds(&self, _access_token: &str) -> AppResult<Vec<DiscordGuild>> {
        self.check()?;
        Ok(self.guilds.lock().unwrap().clone())
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<dyn PollStore>,
    pub discord: Arc<MockDiscord>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    pub fn with_store(store: Arc<dyn PollStore>) -> Self {
        let discord = Arc::new(MockDiscord::new("member-1", "alice", &[REQUIRED_GUILD]));
        let state = AppState::new(store.clone(), discord.clone(), Arc::new(test_config()));
        let router = build_router(state).expect("router builds");

        Self {
            router,
            store,
            discord,
        }
    }

    pub async fn seed_user(
        &self,
        discord_id: &str,
        username: &str,
        is_admin: bool,
        in_required_server: bool,
    ) -> (User, String) {
        let user = self
            .store
            .upsert_user(UserProfile {
                discord_id: discord_id.to_string(),
                username: username.to_string(),
                discriminator: None,
                avatar: None,
                is_admin,
                in_required_server,
            })
            .await
            .expect("seed user");
        let token = create_token(&user.id.to_hex(), JWT_SECRET).expect("token");
        (user, token)
    }

    pub async fn admin(&self) -> (User, String) {
        self.seed_user(ADMIN_DISCORD_ID, "admin", true, true).await
    }

    pub async fn member(&self, discord_id: &str, username: &str) -> (User, String) {
        self.seed_user(discord_id, username, false, true).await
    }

    pub async fn outsider(&self, discord_id: &str, username: &str) -> (User, String) {
        self.seed_user(discord_id, username, false, false).await
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    /// Creates a poll as `token` and returns `(poll_id, option_ids)`.
    pub async fn create_poll(&self, token: &str, title: &str, options: &[&str]) -> (String, Vec<String>) {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/polls",
                Some(token),
                Some(serde_json::json!({ "title": title, "options": options })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create poll failed: {}", body);

        let poll_id = body["_id"].as_str().unwrap().to_string();
        let option_ids = body["options"]
            .as_array()
            .unwrap()
            .iter()
            .map(|opt| opt["id"].as_str().unwrap().to_string())
            .collect();
        (poll_id, option_ids)
    }

    pub async fn vote(&self, token: &str, poll_id: &str, option_id: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            &format!("/api/votes/{}", poll_id),
            Some(token),
            Some(serde_json::json!({ "optionId": option_id })),
        )
        .await
    }
}

pub fn option_votes(poll: &Value) -> Vec<u64> {
    poll["options"]
        .as_array()
        .unwrap()
        .iter()
        .map(|opt| opt["votes"].as_u64().unwrap())
        .collect()
}
