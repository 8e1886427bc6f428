use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::PollStore;
use crate::utils::discord::DiscordApi;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PollStore>,
    pub discord: Arc<dyn DiscordApi>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn PollStore>,
        discord: Arc<dyn DiscordApi>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self { store, discord, config }
    }
}
