use actix_web::{web, HttpResponse, Result};
use serde::Serialize;
use uuid::Uuid;

use crate::database::models::{LoginInput, RegisterInput, UserClub, UserInfo};
use crate::database::repositories::{MembershipRepository, UserRepository};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user: UserInfo,
    pub clubs: Vec<UserClub>,
    pub default_club_id: Option<Uuid>,
}

pub async fn register(
    request: web::Json<RegisterInput>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let response = state.auth_service.register(request.into_inner()).await?;

    Ok(ApiResponse::created(response))
}

pub async fn login(
    request: web::Json<LoginInput>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let response = state.auth_service.login(request.into_inner()).await?;

    Ok(ApiResponse::success(response))
}

pub async fn me(
    claims: Claims,
    user_repo: web::Data<UserRepository>,
    membership_repo: web::Data<MembershipRepository>,
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

    let clubs = membership_repo
        .list_clubs_for_user(user_id)
        .await
        .map_err(|e| {
            log::error!("Failed to get clubs for user {}: {}", user_id, e);
            AppError::DatabaseError(e)
        })?;

    let default_club_id = user.default_club_id;

    let response = MeResponse {
        user: user.into(),
        clubs,
        default_club_id,
    };

    Ok(ApiResponse::success(response))
}
