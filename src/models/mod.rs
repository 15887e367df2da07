pub mod user;
pub mod workout;
