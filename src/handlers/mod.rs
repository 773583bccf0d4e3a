pub mod auth;
pub mod clubs;
pub mod members;
pub mod shared;
pub mod user;
pub mod users;
