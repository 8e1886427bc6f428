pub mod guards;
pub mod jwt;
