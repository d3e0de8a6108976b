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
use crate::models::history::{HistoryEntry, RECENT_HISTORY_LIMIT};
use crate::AppState;

pub async fn list_history(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<Activity>>> {
    let activities = state
        .store
        .recent_history(auth_user.id, RECENT_HISTORY_LIMIT)
        .await?;
    Ok(Json(activities))
}

/// Every call appends a new view; repeats are not collapsed.
pub async fn add_history(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    AppPath(activity_id): AppPath<Uuid>,
) -> AppResult<(StatusCode, Json<HistoryEntry>)> {
    if state.store.get_activity(activity_id).await?.is_none() {
        return Err(AppError::NotFound("Activity not found".into()));
    }

    match state.store.add_history(auth_user.id, activity_id).await {
        Ok(entry) => Ok((StatusCode::CREATED, Json(entry))),
        Err(StoreError::MissingReference) => {
            Err(AppError::NotFound("Activity not found".into()))
        }
        Err(e) => Err(e.into()),
    }
}
