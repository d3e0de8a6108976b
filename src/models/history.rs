use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub activity_id: Uuid,
    pub viewed_at: DateTime<Utc>,
}

/// Number of views returned by GET /api/history.
pub const RECENT_HISTORY_LIMIT: i64 = 10;
