pub mod auth;
pub mod club;
pub mod membership;
pub mod season;
pub mod user;

// Re-export all models for easy importing
pub use auth::*;
pub use club::*;
pub use membership::*;
pub use season::*;
pub use user::*;
