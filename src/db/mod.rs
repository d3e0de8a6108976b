//! Persistence seam.
//!
//! Handlers only ever talk to a [`Store`]. Production wires in [`PgStore`];
//! tests use [`MemoryStore`]. Uniqueness (usernames, favorite pairs, one mood
//! per user per day) is enforced by the store itself, never by locking in the
//! handlers.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::activity::{Activity, ActivityFilter, ActivityRequest};
use crate::models::favorite::Favorite;
use crate::models::history::HistoryEntry;
use crate::models::mood_stat::MoodStat;
use crate::models::user::{Role, User};

pub mod memory;
pub mod pool;
pub mod postgres;
pub mod seed;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violated")]
    Conflict,

    #[error("referenced row does not exist")]
    MissingReference,

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return StoreError::Conflict;
            }
            if db.is_foreign_key_violation() {
                return StoreError::MissingReference;
            }
        }
        StoreError::Database(e)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Store: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;

    /// Fails with [`StoreError::Conflict`] when the username is taken.
    async fn create_user(&self, username: &str, password_hash: &str, role: Role)
        -> StoreResult<User>;
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Live activities matching every present filter, oldest first.
    async fn list_activities(&self, filter: &ActivityFilter) -> StoreResult<Vec<Activity>>;
    async fn get_activity(&self, id: Uuid) -> StoreResult<Option<Activity>>;
    async fn create_activity(&self, input: &ActivityRequest) -> StoreResult<Activity>;
    async fn update_activity(
        &self,
        id: Uuid,
        input: &ActivityRequest,
    ) -> StoreResult<Option<Activity>>;
    /// Returns `false` when no live row had that id.
    async fn soft_delete_activity(&self, id: Uuid) -> StoreResult<bool>;
    async fn count_activities(&self) -> StoreResult<i64>;

    /// Fails with [`StoreError::Conflict`] when the pair already exists.
    async fn add_favorite(&self, user_id: Uuid, activity_id: Uuid) -> StoreResult<Favorite>;
    async fn remove_favorite(&self, user_id: Uuid, activity_id: Uuid) -> StoreResult<()>;
    async fn list_favorites(&self, user_id: Uuid) -> StoreResult<Vec<Activity>>;

    async fn add_history(&self, user_id: Uuid, activity_id: Uuid) -> StoreResult<HistoryEntry>;
    /// Activities behind the `limit` newest views, newest first. An activity
    /// viewed twice appears twice.
    async fn recent_history(&self, user_id: Uuid, limit: i64) -> StoreResult<Vec<Activity>>;

    /// Atomic insert-or-update keyed on `(user_id, date)`.
    async fn upsert_mood(&self, user_id: Uuid, date: NaiveDate, mood: &str)
        -> StoreResult<MoodStat>;
    /// Inclusive on both ends, ascending by date.
    async fn moods_between(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> StoreResult<Vec<MoodStat>>;
}
