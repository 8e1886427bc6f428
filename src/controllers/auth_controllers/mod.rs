pub mod callback;
pub mod discord_login;
pub mod me;
pub mod models;
