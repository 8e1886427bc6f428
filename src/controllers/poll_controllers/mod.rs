pub mod close_poll;
pub mod create_poll;
pub mod delete_poll;
pub mod get_poll;
pub mod get_voters;
pub mod models;
pub mod polls;
pub mod update_poll;
