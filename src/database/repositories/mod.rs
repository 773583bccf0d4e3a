pub mod club;
pub mod membership;
pub mod season;
pub mod user;

pub use club::ClubRepository;
pub use membership::MembershipRepository;
pub use season::SeasonRepository;
pub use user::UserRepository;
