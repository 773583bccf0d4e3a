pub mod auth;
pub mod club_resolver;

pub use auth::AuthService;
pub use club_resolver::{ClubResolver, ResolvedClub};
