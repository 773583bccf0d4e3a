use actix_web::{
    web::{self, Json, Path},
    HttpResponse, Result,
};
use uuid::Uuid;

use crate::database::models::AddMemberInput;
use crate::database::repositories::{ClubRepository, MembershipRepository, UserRepository};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;

/// GET /clubs/{id}/users: membership or ADMIN; joined_at descending.
pub async fn list_members(
    claims: Claims,
    path: Path<Uuid>,
    membership_repo: web::Data<MembershipRepository>,
) -> Result<HttpResponse> {
    let club_id = path.into_inner();

    if !claims.is_admin() {
        let membership = membership_repo
            .find_membership(claims.user_id(), club_id)
            .await
            .map_err(|e| {
                log::error!(
                    "Failed to check membership of user {} in club {}: {}",
                    claims.user_id(),
                    club_id,
                    e
                );
                AppError::DatabaseError(e)
            })?;

        if membership.is_none() {
            return Err(AppError::Forbidden("Not a member of this club".to_string()).into());
        }
    }

    let members = membership_repo.list_members(club_id).await.map_err(|e| {
        log::error!("Failed to list members of club {}: {}", club_id, e);
        AppError::DatabaseError(e)
    })?;

    Ok(ApiResponse::success(members))
}

/// POST /clubs/{id}/users: ADMIN only; duplicate membership is a conflict.
pub async fn add_member(
    claims: Claims,
    path: Path<Uuid>,
    input: Json<AddMemberInput>,
    club_repo: web::Data<ClubRepository>,
    user_repo: web::Data<UserRepository>,
    membership_repo: web::Data<MembershipRepository>,
) -> Result<HttpResponse> {
    claims.require_admin()?;

    let club_id = path.into_inner();
    let input = input.into_inner();

    club_repo
        .find_by_id(club_id)
        .await
        .map_err(|e| {
            log::error!("Failed to load club {}: {}", club_id, e);
            AppError::DatabaseError(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Club {} not found", club_id)))?;

    user_repo
        .find_by_id(input.user_id)
        .await
        .map_err(|e| {
            log::error!("Failed to load user {}: {}", input.user_id, e);
            AppError::DatabaseError(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", input.user_id)))?;

    let existing = membership_repo
        .find_membership(input.user_id, club_id)
        .await
        .map_err(|e| {
            log::error!("Failed to check existing membership: {}", e);
            AppError::DatabaseError(e)
        })?;

    if existing.is_some() {
        return Err(AppError::Conflict("User already in club".to_string()).into());
    }

    let membership = membership_repo
        .add_member(club_id, input.user_id, input.role)
        .await
        .map_err(|e| {
            log::error!(
                "Failed to add user {} to club {}: {}",
                input.user_id,
                club_id,
                e
            );
            let err = AppError::DatabaseError(e);
            // A racing insert loses to the unique (user_id, club_id) key
            if err.is_unique_violation() {
                AppError::Conflict("User already in club".to_string())
            } else {
                err
            }
        })?;

    Ok(ApiResponse::created(membership))
}

/// DELETE /clubs/{id}/users/{userId}: ADMIN only; not idempotent, removing
/// an absent membership is a 404.
pub async fn remove_member(
    claims: Claims,
    path: Path<(Uuid, Uuid)>,
    membership_repo: web::Data<MembershipRepository>,
) -> Result<HttpResponse> {
    claims.require_admin()?;

    let (club_id, user_id) = path.into_inner();

    membership_repo
        .remove_member(club_id, user_id)
        .await
        .map_err(|e| {
            log::error!(
                "Failed to remove user {} from club {}: {}",
                user_id,
                club_id,
                e
            );
            AppError::DatabaseError(e)
        })?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "User {} is not a member of club {}",
                user_id, club_id
            ))
        })?;

    Ok(ApiResponse::success_message(
        "Member removed from club successfully",
    ))
}
