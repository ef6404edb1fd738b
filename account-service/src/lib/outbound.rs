pub mod auth;
pub mod repositories;
