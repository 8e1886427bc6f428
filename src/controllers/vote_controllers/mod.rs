pub mod models;
pub mod submit_vote;
