//! Mood log rules shared by the mood-stat endpoints and the activity mood
//! filter, which records the caller's mood for today as a side effect.

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::db::Store;
use crate::error::{AppError, AppResult};
use crate::models::mood_stat::{MoodStat, DEFAULT_WINDOW_DAYS, MAX_MOOD_LEN, MAX_WINDOW_DAYS};

/// Current UTC calendar date.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn validate_mood(mood: &str) -> AppResult<&str> {
    let mood = mood.trim();
    if mood.is_empty() || mood.chars().count() > MAX_MOOD_LEN {
        return Err(AppError::Validation(format!(
            "Mood must be 1-{} characters",
            MAX_MOOD_LEN
        )));
    }
    Ok(mood)
}

/// Empty or missing means `today`; anything else must be `YYYY-MM-DD`.
pub fn resolve_date(raw: Option<&str>, today: NaiveDate) -> AppResult<NaiveDate> {
    match raw.map(str::trim) {
        None | Some("") => Ok(today),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| AppError::Validation("invalid date format".into())),
    }
}

/// Inclusive `[today - (days - 1), today]` for a `days` parameter in 1..=365.
pub fn window(raw_days: Option<&str>, today: NaiveDate) -> AppResult<(NaiveDate, NaiveDate)> {
    let days = match raw_days.map(str::trim) {
        None | Some("") => DEFAULT_WINDOW_DAYS,
        Some(s) => s
            .parse::<i64>()
            .map_err(|_| AppError::Validation("invalid days param".into()))?,
    };

    if !(1..=MAX_WINDOW_DAYS).contains(&days) {
        return Err(AppError::Validation(format!(
            "days must be between 1 and {}",
            MAX_WINDOW_DAYS
        )));
    }

    Ok((today - Duration::days(days - 1), today))
}

/// Sets the user's mood for `date`, overwriting any earlier label that day.
pub async fn record_mood(
    store: &dyn Store,
    user_id: Uuid,
    mood: &str,
    date: NaiveDate,
) -> AppResult<MoodStat> {
    let mood = validate_mood(mood)?;
    let stat = store.upsert_mood(user_id, date, mood).await?;
    tracing::debug!(user_id = %user_id, date = %date, mood = %stat.mood, "Mood recorded");
    Ok(stat)
}
