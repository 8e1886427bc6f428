//! Discord-authenticated community polling API.
//!
//! Members sign in through Discord OAuth, vote on admin-created polls, and
//! read aggregated results. Handlers live in [`controllers`], persistence
//! behind the [`db::PollStore`] trait.

pub mod config;
pub mod controllers;
pub mod db;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

pub use config::AppConfig;
pub use db::{MemoryStore, MongoStore, PollStore};
pub use routes::build_router;
pub use state::AppState;
