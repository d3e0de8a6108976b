use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::models::mood_stat::{MoodStat, MoodStatRequest, MoodStatsQuery};
use crate::services::mood;
use crate::AppState;

pub async fn save_mood_stat(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    AppJson(body): AppJson<MoodStatRequest>,
) -> AppResult<(StatusCode, Json<MoodStat>)> {
    let date = mood::resolve_date(body.date.as_deref(), mood::today())?;
    let stat = mood::record_mood(state.store.as_ref(), auth_user.id, &body.mood, date).await?;
    Ok((StatusCode::CREATED, Json(stat)))
}

pub async fn list_mood_stats(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    AppQuery(query): AppQuery<MoodStatsQuery>,
) -> AppResult<Json<Vec<MoodStat>>> {
    let (from, to) = mood::window(query.days.as_deref(), mood::today())?;
    let stats = state.store.moods_between(auth_user.id, from, to).await?;
    Ok(Json(stats))
}
