use tracing::{info, warn};
use uuid::Uuid;

use super::dto::{ChangePasswordRequest, UpdateProfileRequest};
use crate::{
    auth::{
        dto::{present, PublicUser},
        password::{hash_password, verify_password},
        UserStore,
    },
    error::{AppError, AppResult},
};

pub async fn get_profile(users: &dyn UserStore, user_id: Uuid) -> AppResult<PublicUser> {
    let user = users
        .find_by_id(user_id)
        .await
        .map_err(AppError::server("Failed to fetch profile"))?
        .ok_or_else(|| {
            warn!(user_id = %user_id, "profile for missing user");
            AppError::NotFound("User not found".into())
        })?;
    Ok(PublicUser {
        id: user.id,
        username: user.username,
        email: user.email,
    })
}

/// Overwrites username and email as given. Uniqueness is left to the database.
pub async fn update_profile(
    users: &dyn UserStore,
    user_id: Uuid,
    req: &UpdateProfileRequest,
) -> AppResult<()> {
    let (Some(username), Some(email)) = (present(&req.username), present(&req.email)) else {
        return Err(AppError::Validation("Username and email are required".into()));
    };
    users
        .update_profile(user_id, username, email)
        .await
        .map_err(AppError::server("Server error"))?;
    info!(user_id = %user_id, "profile updated");
    Ok(())
}

pub async fn change_password(
    users: &dyn UserStore,
    user_id: Uuid,
    req: &ChangePasswordRequest,
) -> AppResult<()> {
    let (Some(current), Some(new)) = (
        present(&req.current_password),
        present(&req.new_password),
    ) else {
        return Err(AppError::Validation(
            "Current and new password are required".into(),
        ));
    };

    let user = users
        .find_by_id(user_id)
        .await
        .map_err(AppError::server("Server error"))?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let matches =
        verify_password(current, &user.password_hash).map_err(AppError::server("Server error"))?;
    if !matches {
        warn!(user_id = %user_id, "password change with wrong current password");
        return Err(AppError::InvalidCredentials("Current password incorrect".into()));
    }

    let hash = hash_password(new).map_err(AppError::server("Server error"))?;
    users
        .update_password(user_id, &hash)
        .await
        .map_err(AppError::server("Server error"))?;
    info!(user_id = %user_id, "password changed");
    Ok(())
}
