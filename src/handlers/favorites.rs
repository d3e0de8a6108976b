use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::db::StoreError;
use crate::error::{AppError, AppResult};
use crate::extract::AppPath;
use crate::models::activity::Activity;
use crate::models::favorite::Favorite;
use crate::AppState;

pub async fn list_favorites(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<Activity>>> {
    let activities = state.store.list_favorites(auth_user.id).await?;
    Ok(Json(activities))
}

pub async fn add_favorite(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    AppPath(activity_id): AppPath<Uuid>,
) -> AppResult<(StatusCode, Json<Favorite>)> {
    if state.store.get_activity(activity_id).await?.is_none() {
        return Err(AppError::NotFound("Activity not found".into()));
    }

    match state.store.add_favorite(auth_user.id, activity_id).await {
        Ok(favorite) => Ok((StatusCode::CREATED, Json(favorite))),
        Err(StoreError::Conflict) => Err(AppError::Conflict("already in favorites".into())),
        Err(StoreError::MissingReference) => {
            Err(AppError::NotFound("Activity not found".into()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Succeeds whether or not the pair existed.
pub async fn remove_favorite(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    AppPath(activity_id): AppPath<Uuid>,
) -> AppResult<StatusCode> {
    state
        .store
        .remove_favorite(auth_user.id, activity_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
