pub mod discord;
pub mod error;
pub mod extract;
pub mod session;
