use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::models::activity::{Activity, ActivityQuery, ActivityRequest};
use crate::services::mood;
use crate::AppState;

/// Unparseable filter values are ignored rather than rejected, and a repeated
/// key keeps its first value. A `mood` filter also records that mood for the
/// caller's today before listing.
pub async fn list_activities(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    AppQuery(params): AppQuery<Vec<(String, String)>>,
) -> AppResult<Json<Vec<Activity>>> {
    let filter = ActivityQuery::from_pairs(params).into_filter();

    if let Some(current_mood) = filter.mood.as_deref() {
        mood::record_mood(
            state.store.as_ref(),
            auth_user.id,
            current_mood,
            mood::today(),
        )
        .await?;
    }

    let activities = state.store.list_activities(&filter).await?;
    Ok(Json(activities))
}

pub async fn get_activity(
    State(state): State<AppState>,
    AppPath(activity_id): AppPath<Uuid>,
) -> AppResult<Json<Activity>> {
    let activity = state
        .store
        .get_activity(activity_id)
        .await?
        .ok_or(AppError::NotFound("Activity not found".into()))?;

    Ok(Json(activity))
}

pub async fn create_activity(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    AppJson(body): AppJson<ActivityRequest>,
) -> AppResult<(StatusCode, Json<Activity>)> {
    body.validate()?;

    let activity = state.store.create_activity(&body).await?;
    tracing::info!(activity_id = %activity.id, user_id = %auth_user.id, "Activity created");

    Ok((StatusCode::CREATED, Json(activity)))
}

pub async fn update_activity(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    AppPath(activity_id): AppPath<Uuid>,
    AppJson(body): AppJson<ActivityRequest>,
) -> AppResult<Json<Activity>> {
    body.validate()?;

    let activity = state
        .store
        .update_activity(activity_id, &body)
        .await?
        .ok_or(AppError::NotFound("Activity not found".into()))?;
    tracing::info!(activity_id = %activity.id, user_id = %auth_user.id, "Activity updated");

    Ok(Json(activity))
}

pub async fn delete_activity(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    AppPath(activity_id): AppPath<Uuid>,
) -> AppResult<StatusCode> {
    if !state.store.soft_delete_activity(activity_id).await? {
        return Err(AppError::NotFound("Activity not found".into()));
    }
    tracing::info!(activity_id = %activity_id, user_id = %auth_user.id, "Activity deleted");

    Ok(StatusCode::NO_CONTENT)
}
