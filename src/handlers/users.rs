use actix_web::{
    web::{self, Json, Path},
    HttpResponse, Result,
};
use bcrypt::{hash, DEFAULT_COST};
use uuid::Uuid;

use crate::database::models::{UserAction, UserInfo};
use crate::database::repositories::UserRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;

/// GET /users: ADMIN only.
pub async fn list_users(
    claims: Claims,
    user_repo: web::Data<UserRepository>,
) -> Result<HttpResponse> {
    claims.require_admin()?;

    let users = user_repo.list_users().await.map_err(|e| {
        log::error!("Failed to list users: {}", e);
        AppError::DatabaseError(e)
    })?;

    let users: Vec<UserInfo> = users.into_iter().map(UserInfo::from).collect();

    Ok(ApiResponse::success(users))
}

/// PATCH /users/{id}: ADMIN only; dispatches on the `action` tag.
pub async fn update_user(
    claims: Claims,
    path: Path<Uuid>,
    input: Json<UserAction>,
    user_repo: web::Data<UserRepository>,
) -> Result<HttpResponse> {
    claims.require_admin()?;

    let user_id = path.into_inner();

    match input.into_inner() {
        UserAction::UpdateRole { role } => {
            user_repo
                .update_role(user_id, role)
                .await
                .map_err(|e| {
                    log::error!("Failed to update role of user {}: {}", user_id, e);
                    AppError::DatabaseError(e)
                })?
                .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;
        }
        UserAction::ToggleActive => {
            user_repo
                .toggle_active(user_id)
                .await
                .map_err(|e| {
                    log::error!("Failed to toggle active flag of user {}: {}", user_id, e);
                    AppError::DatabaseError(e)
                })?
                .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;
        }
        UserAction::ResetPassword { password } => {
            if password.chars().count() < 6 {
                return Err(AppError::Validation(
                    "password must be at least 6 characters".to_string(),
                )
                .into());
            }

            let password_hash = hash(&password, DEFAULT_COST).map_err(AppError::from)?;

            user_repo
                .update_password(user_id, &password_hash)
                .await
                .map_err(|e| {
                    log::error!("Failed to reset password of user {}: {}", user_id, e);
                    AppError::DatabaseError(e)
                })?
                .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;
        }
    }

    Ok(ApiResponse::success_message("User updated successfully"))
}

/// DELETE /users/{id}: ADMIN only; membership rows cascade.
pub async fn delete_user(
    claims: Claims,
    path: Path<Uuid>,
    user_repo: web::Data<UserRepository>,
) -> Result<HttpResponse> {
    claims.require_admin()?;

    let user_id = path.into_inner();

    user_repo
        .delete_user(user_id)
        .await
        .map_err(|e| {
            log::error!("Failed to delete user {}: {}", user_id, e);
            AppError::DatabaseError(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

    Ok(ApiResponse::success_message("User deleted successfully"))
}
