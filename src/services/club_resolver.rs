use uuid::Uuid;

use crate::database::models::{Club, User};
use crate::database::repositories::{ClubRepository, MembershipRepository};

/// Outcome of resolving the active club for a request.
///
/// `NoAccess` (non-admin without a single membership) and `NoneSelected`
/// (admin operating without a club context) are distinct terminal states:
/// the first routes to a "no access" experience, the second is allowed.
#[derive(Debug, Clone)]
pub enum ResolvedClub {
    Club(Club),
    NoneSelected,
    NoAccess,
}

/// Determines the single club a request operates against.
///
/// Fallback order: requested club id (if the caller may access it), then the
/// user's stored default club, then the most recently joined membership.
/// Every step reads fresh state; nothing is cached between requests.
#[derive(Clone)]
pub struct ClubResolver {
    club_repository: ClubRepository,
    membership_repository: MembershipRepository,
}

impl ClubResolver {
    pub fn new(
        club_repository: ClubRepository,
        membership_repository: MembershipRepository,
    ) -> Self {
        Self {
            club_repository,
            membership_repository,
        }
    }

    /// ADMIN users may access any club; everyone else needs a membership row.
    pub async fn has_access(&self, user: &User, club_id: Uuid) -> Result<bool, sqlx::Error> {
        if user.is_admin() {
            return Ok(true);
        }

        let membership = self
            .membership_repository
            .find_membership(user.id, club_id)
            .await?;

        Ok(membership.is_some())
    }

    /// Pure read. A store failure in any step is logged and treated as a
    /// miss for that step, so resolution degrades through the fallbacks
    /// instead of surfacing an error.
    pub async fn resolve(&self, user: &User, requested_club_id: Option<Uuid>) -> ResolvedClub {
        // 1. Club requested explicitly, e.g. via ?clubId=
        if let Some(club_id) = requested_club_id {
            if let Some(club) = self.accessible_club(user, club_id).await {
                return ResolvedClub::Club(club);
            }
        }

        // 2. The user's stored default, revalidated: the preference may
        //    outlive the membership or the club itself.
        if let Some(club_id) = user.default_club_id {
            if let Some(club) = self.accessible_club(user, club_id).await {
                return ResolvedClub::Club(club);
            }
        }

        // 3. Most recently joined club.
        match self.membership_repository.list_clubs_for_user(user.id).await {
            Ok(user_clubs) => {
                if let Some(user_club) = user_clubs.into_iter().next() {
                    return ResolvedClub::Club(user_club.club);
                }
            }
            Err(e) => {
                log::warn!("Failed to load memberships for user {}: {}", user.id, e);
            }
        }

        // 4. No club context at all.
        if user.is_admin() {
            ResolvedClub::NoneSelected
        } else {
            ResolvedClub::NoAccess
        }
    }

    async fn accessible_club(&self, user: &User, club_id: Uuid) -> Option<Club> {
        match self.has_access(user, club_id).await {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => {
                log::warn!(
                    "Failed to check access of user {} to club {}: {}",
                    user.id,
                    club_id,
                    e
                );
                return None;
            }
        }

        match self.club_repository.find_by_id(club_id).await {
            // The club may have been deleted since the id was issued
            Ok(club) => club,
            Err(e) => {
                log::warn!("Failed to load club {}: {}", club_id, e);
                None
            }
        }
    }
}
