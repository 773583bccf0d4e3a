use actix_web::{
    web::{self, Json},
    HttpResponse, Result,
};

use crate::database::models::SetDefaultClubInput;
use crate::database::repositories::{MembershipRepository, UserRepository};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;

/// GET /user/clubs: the caller's memberships, most recently joined first.
pub async fn get_user_clubs(
    claims: Claims,
    membership_repo: web::Data<MembershipRepository>,
) -> Result<HttpResponse> {
    let user_id = claims.user_id();

    let clubs = membership_repo
        .list_clubs_for_user(user_id)
        .await
        .map_err(|e| {
            log::error!("Failed to get clubs for user {}: {}", user_id, e);
            AppError::DatabaseError(e)
        })?;

    Ok(ApiResponse::success(clubs))
}

/// PATCH /user/default-club (also POST /clubs/default): persist the
/// caller's preferred club. A non-null id must match one of the caller's
/// memberships; null always clears.
pub async fn set_default_club(
    claims: Claims,
    input: Json<SetDefaultClubInput>,
    user_repo: web::Data<UserRepository>,
    membership_repo: web::Data<MembershipRepository>,
) -> Result<HttpResponse> {
    let user_id = claims.user_id();
    let club_id = input.into_inner().club_id;

    if let Some(club_id) = club_id {
        let membership = membership_repo
            .find_membership(user_id, club_id)
            .await
            .map_err(|e| {
                log::error!(
                    "Failed to check membership of user {} in club {}: {}",
                    user_id,
                    club_id,
                    e
                );
                AppError::DatabaseError(e)
            })?;

        if membership.is_none() {
            return Err(
                AppError::Validation("User is not a member of this club".to_string()).into(),
            );
        }
    }

    user_repo
        .set_default_club(user_id, club_id)
        .await
        .map_err(|e| {
            log::error!("Failed to set default club for user {}: {}", user_id, e);
            AppError::DatabaseError(e)
        })?;

    Ok(ApiResponse::success_message("Default club updated"))
}
