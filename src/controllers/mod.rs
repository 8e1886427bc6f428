pub mod auth_controllers;
pub mod poll_controllers;
pub mod result_controllers;
pub mod vote_controllers;
pub mod status;
