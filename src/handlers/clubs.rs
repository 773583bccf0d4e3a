use actix_web::{
    web::{self, Json, Path, Query},
    HttpResponse, Result,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::{
    Club, ClubSummary, CreateClubInput, CreateSeasonInput, MemberInfo, Season, UpdateClubInput,
};
use crate::database::repositories::{
    ClubRepository, MembershipRepository, SeasonRepository, UserRepository,
};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;
use crate::services::{ClubResolver, ResolvedClub};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubListResponse {
    pub clubs: Vec<ClubSummary>,
    pub default_club_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubDetails {
    #[serde(flatten)]
    pub club: Club,
    pub seasons: Vec<Season>,
    pub members: Vec<MemberInfo>,
    pub member_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClubResponse {
    pub club: Club,
    pub season: Season,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentClubQuery {
    pub club_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentClubResponse {
    pub state: &'static str,
    pub club: Option<Club>,
}

impl From<ResolvedClub> for CurrentClubResponse {
    fn from(resolved: ResolvedClub) -> Self {
        match resolved {
            ResolvedClub::Club(club) => Self {
                state: "ok",
                club: Some(club),
            },
            ResolvedClub::NoneSelected => Self {
                state: "noneSelected",
                club: None,
            },
            ResolvedClub::NoAccess => Self {
                state: "noAccess",
                club: None,
            },
        }
    }
}

/// Club-membership gate: ADMIN bypasses, everyone else needs a fresh
/// membership row for this exact request.
async fn require_membership(
    claims: &Claims,
    club_id: Uuid,
    membership_repo: &MembershipRepository,
) -> Result<(), AppError> {
    if claims.is_admin() {
        return Ok(());
    }

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
        return Err(AppError::Forbidden(
            "Not a member of this club".to_string(),
        ));
    }

    Ok(())
}

/// GET /clubs: all clubs for ADMIN, the caller's member clubs otherwise.
pub async fn list_clubs(
    claims: Claims,
    club_repo: web::Data<ClubRepository>,
    user_repo: web::Data<UserRepository>,
) -> Result<HttpResponse> {
    let user_id = claims.user_id();

    let clubs = if claims.is_admin() {
        club_repo.list_all().await
    } else {
        club_repo.list_for_user(user_id).await
    }
    .map_err(|e| {
        log::error!("Failed to list clubs for user {}: {}", user_id, e);
        AppError::DatabaseError(e)
    })?;

    // Stored preference, read fresh rather than trusted from the token
    let default_club_id = user_repo
        .find_by_id(user_id)
        .await
        .map_err(|e| {
            log::error!("Failed to load user {}: {}", user_id, e);
            AppError::DatabaseError(e)
        })?
        .and_then(|u| u.default_club_id);

    Ok(ApiResponse::success(ClubListResponse {
        clubs,
        default_club_id,
    }))
}

/// POST /clubs: ADMIN only; creates the club and its default season.
pub async fn create_club(
    claims: Claims,
    request: Json<CreateClubInput>,
    club_repo: web::Data<ClubRepository>,
) -> Result<HttpResponse> {
    claims.require_admin()?;

    let request = request.into_inner();
    request.validate()?;

    let (club, season) = club_repo.create_club(&request).await.map_err(|e| {
        log::error!("Failed to create club '{}': {}", request.name, e);
        AppError::DatabaseError(e)
    })?;

    Ok(ApiResponse::created(CreateClubResponse { club, season }))
}

/// GET /clubs/current: resolve the active club for this request.
pub async fn current_club(
    claims: Claims,
    query: Query<CurrentClubQuery>,
    user_repo: web::Data<UserRepository>,
    resolver: web::Data<ClubResolver>,
) -> Result<HttpResponse> {
    let user_id = claims.user_id();

    let user = user_repo
        .find_by_id(user_id)
        .await
        .map_err(|e| {
            log::error!("Failed to load user {}: {}", user_id, e);
            AppError::DatabaseError(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

    let resolved = resolver.resolve(&user, query.club_id).await;

    Ok(ApiResponse::success(CurrentClubResponse::from(resolved)))
}

/// GET /clubs/{id}: membership or ADMIN.
pub async fn get_club(
    claims: Claims,
    path: Path<Uuid>,
    club_repo: web::Data<ClubRepository>,
    season_repo: web::Data<SeasonRepository>,
    membership_repo: web::Data<MembershipRepository>,
) -> Result<HttpResponse> {
    let club_id = path.into_inner();

    let club = club_repo
        .find_by_id(club_id)
        .await
        .map_err(|e| {
            log::error!("Failed to load club {}: {}", club_id, e);
            AppError::DatabaseError(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Club {} not found", club_id)))?;

    require_membership(&claims, club_id, &membership_repo).await?;

    let seasons = season_repo.list_for_club(club_id).await.map_err(|e| {
        log::error!("Failed to load seasons for club {}: {}", club_id, e);
        AppError::DatabaseError(e)
    })?;

    let members = membership_repo.list_members(club_id).await.map_err(|e| {
        log::error!("Failed to load members for club {}: {}", club_id, e);
        AppError::DatabaseError(e)
    })?;

    let member_count = members.len();

    Ok(ApiResponse::success(ClubDetails {
        club,
        seasons,
        members,
        member_count,
    }))
}

/// PATCH /clubs/{id}: ADMIN only; validates before any write.
pub async fn update_club(
    claims: Claims,
    path: Path<Uuid>,
    request: Json<UpdateClubInput>,
    club_repo: web::Data<ClubRepository>,
) -> Result<HttpResponse> {
    claims.require_admin()?;

    let club_id = path.into_inner();
    let request = request.into_inner();
    request.validate()?;

    let club = club_repo
        .update_club(club_id, &request)
        .await
        .map_err(|e| {
            log::error!("Failed to update club {}: {}", club_id, e);
            AppError::DatabaseError(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Club {} not found", club_id)))?;

    Ok(ApiResponse::success(club))
}

/// DELETE /clubs/{id}: ADMIN only; seasons and memberships cascade.
pub async fn delete_club(
    claims: Claims,
    path: Path<Uuid>,
    club_repo: web::Data<ClubRepository>,
) -> Result<HttpResponse> {
    claims.require_admin()?;

    let club_id = path.into_inner();

    club_repo
        .delete_club(club_id)
        .await
        .map_err(|e| {
            log::error!("Failed to delete club {}: {}", club_id, e);
            AppError::DatabaseError(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Club {} not found", club_id)))?;

    Ok(ApiResponse::success_message("Club deleted successfully"))
}

/// GET /clubs/{id}/seasons: membership or ADMIN, newest first.
pub async fn list_seasons(
    claims: Claims,
    path: Path<Uuid>,
    season_repo: web::Data<SeasonRepository>,
    membership_repo: web::Data<MembershipRepository>,
) -> Result<HttpResponse> {
    let club_id = path.into_inner();

    require_membership(&claims, club_id, &membership_repo).await?;

    let seasons = season_repo.list_for_club(club_id).await.map_err(|e| {
        log::error!("Failed to load seasons for club {}: {}", club_id, e);
        AppError::DatabaseError(e)
    })?;

    Ok(ApiResponse::success(seasons))
}

/// POST /clubs/{id}/seasons: ADMIN only.
pub async fn create_season(
    claims: Claims,
    path: Path<Uuid>,
    request: Json<CreateSeasonInput>,
    club_repo: web::Data<ClubRepository>,
    season_repo: web::Data<SeasonRepository>,
) -> Result<HttpResponse> {
    claims.require_admin()?;

    let club_id = path.into_inner();
    let request = request.into_inner();

    if request.name.is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()).into());
    }

    club_repo
        .find_by_id(club_id)
        .await
        .map_err(|e| {
            log::error!("Failed to load club {}: {}", club_id, e);
            AppError::DatabaseError(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Club {} not found", club_id)))?;

    let season = season_repo
        .create_season(club_id, &request)
        .await
        .map_err(|e| {
            log::error!("Failed to create season for club {}: {}", club_id, e);
            AppError::DatabaseError(e)
        })?;

    Ok(ApiResponse::created(season))
}
