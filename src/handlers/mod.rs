pub mod auth;
pub mod profile;
pub mod stats;
pub mod workout;
