use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, put},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{ChangePasswordRequest, MessageResponse, UpdateProfileRequest},
    services,
};
use crate::{
    auth::{dto::PublicUser, AuthUser},
    error::AppResult,
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/password", put(change_password))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<PublicUser>> {
    services::get_profile(state.users.as_ref(), user.id)
        .await
        .map(Json)
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(payload) = payload?;
    services::update_profile(state.users.as_ref(), user.id, &payload).await?;
    Ok(Json(MessageResponse {
        message: "Profile updated successfully",
    }))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(payload) = payload?;
    services::change_password(state.users.as_ref(), user.id, &payload).await?;
    Ok(Json(MessageResponse {
        message: "Password updated successfully",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::IntoResponse};
    use uuid::Uuid;

    #[tokio::test]
    async fn profile_of_unknown_token_subject_is_not_found() {
        let state = AppState::fake();
        let user = AuthUser {
            id: Uuid::new_v4(),
            username: "ghost".into(),
        };
        let res = get_profile(State(state), user).await.into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn message_response_shape() {
        let json = serde_json::to_value(MessageResponse {
            message: "Profile updated successfully",
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Profile updated successfully" }));
    }
}
