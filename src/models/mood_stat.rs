use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Longest mood label the store accepts.
pub const MAX_MOOD_LEN: usize = 64;

pub const DEFAULT_WINDOW_DAYS: i64 = 7;
pub const MAX_WINDOW_DAYS: i64 = 365;

/// At most one row per user per calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct MoodStat {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub mood: String,
}

/// POST /api/mood-stats
#[derive(Debug, Deserialize)]
pub struct MoodStatRequest {
    pub mood: String,
    /// `YYYY-MM-DD`; absent or empty means today.
    pub date: Option<String>,
}

/// GET /api/users/me/mood-stats
#[derive(Debug, Default, Deserialize)]
pub struct MoodStatsQuery {
    pub days: Option<String>,
}
