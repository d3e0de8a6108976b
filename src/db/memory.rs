//! In-process [`Store`] with the same observable behaviour as [`PgStore`]:
//! soft-deleted rows are hidden, unique keys yield [`StoreError::Conflict`]
//! and dangling references yield [`StoreError::MissingReference`].
//!
//! [`PgStore`]: super::PgStore

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::models::activity::{Activity, ActivityFilter, ActivityRequest};
use crate::models::favorite::Favorite;
use crate::models::history::HistoryEntry;
use crate::models::mood_stat::MoodStat;
use crate::models::user::{Role, User};

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    activities: Vec<Activity>,
    favorites: Vec<Favorite>,
    // Append-only, oldest first.
    history: Vec<HistoryEntry>,
    moods: Vec<MoodStat>,
}

impl Tables {
    fn live_activity(&self, id: Uuid) -> Option<&Activity> {
        self.activities
            .iter()
            .find(|a| a.id == id && a.deleted_at.is_none())
    }

    fn check_refs(&self, user_id: Uuid, activity_id: Uuid) -> StoreResult<()> {
        let user_exists = self.users.iter().any(|u| u.id == user_id);
        let activity_exists = self.activities.iter().any(|a| a.id == activity_id);
        if user_exists && activity_exists {
            Ok(())
        } else {
            Err(StoreError::MissingReference)
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mood rows held for a user, regardless of date.
    pub async fn mood_row_count(&self, user_id: Uuid) -> usize {
        let tables = self.inner.lock().await;
        tables.moods.iter().filter(|m| m.user_id == user_id).count()
    }
}

fn apply(activity: &mut Activity, input: &ActivityRequest) {
    activity.name = input.name.clone();
    activity.description = input.description.clone();
    activity.budget = input.budget;
    activity.time = input.time;
    activity.weather = input.weather.clone();
    activity.people_count = input.people_count;
    activity.moods = input.moods.clone();
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> StoreResult<User> {
        let mut tables = self.inner.lock().await;
        if tables.users.iter().any(|u| u.username == username) {
            return Err(StoreError::Conflict);
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            role,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let tables = self.inner.lock().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let tables = self.inner.lock().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_activities(&self, filter: &ActivityFilter) -> StoreResult<Vec<Activity>> {
        let tables = self.inner.lock().await;
        Ok(tables
            .activities
            .iter()
            .filter(|a| a.deleted_at.is_none() && filter.matches(a))
            .cloned()
            .collect())
    }

    async fn get_activity(&self, id: Uuid) -> StoreResult<Option<Activity>> {
        let tables = self.inner.lock().await;
        Ok(tables.live_activity(id).cloned())
    }

    async fn create_activity(&self, input: &ActivityRequest) -> StoreResult<Activity> {
        let mut tables = self.inner.lock().await;
        let mut activity = Activity {
            id: Uuid::new_v4(),
            name: String::new(),
            description: None,
            budget: None,
            time: None,
            weather: None,
            people_count: None,
            moods: Vec::new(),
            created_at: Utc::now(),
            deleted_at: None,
        };
        apply(&mut activity, input);
        tables.activities.push(activity.clone());
        Ok(activity)
    }

    async fn update_activity(
        &self,
        id: Uuid,
        input: &ActivityRequest,
    ) -> StoreResult<Option<Activity>> {
        let mut tables = self.inner.lock().await;
        let Some(activity) = tables
            .activities
            .iter_mut()
            .find(|a| a.id == id && a.deleted_at.is_none())
        else {
            return Ok(None);
        };
        apply(activity, input);
        Ok(Some(activity.clone()))
    }

    async fn soft_delete_activity(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.inner.lock().await;
        match tables
            .activities
            .iter_mut()
            .find(|a| a.id == id && a.deleted_at.is_none())
        {
            Some(activity) => {
                activity.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_activities(&self) -> StoreResult<i64> {
        let tables = self.inner.lock().await;
        Ok(tables.activities.len() as i64)
    }

    async fn add_favorite(&self, user_id: Uuid, activity_id: Uuid) -> StoreResult<Favorite> {
        let mut tables = self.inner.lock().await;
        tables.check_refs(user_id, activity_id)?;

        let favorite = Favorite {
            user_id,
            activity_id,
        };
        if tables.favorites.contains(&favorite) {
            return Err(StoreError::Conflict);
        }
        tables.favorites.push(favorite);
        Ok(favorite)
    }

    async fn remove_favorite(&self, user_id: Uuid, activity_id: Uuid) -> StoreResult<()> {
        let mut tables = self.inner.lock().await;
        tables
            .favorites
            .retain(|f| !(f.user_id == user_id && f.activity_id == activity_id));
        Ok(())
    }

    async fn list_favorites(&self, user_id: Uuid) -> StoreResult<Vec<Activity>> {
        let tables = self.inner.lock().await;
        let mut activities: Vec<Activity> = tables
            .favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .filter_map(|f| tables.live_activity(f.activity_id).cloned())
            .collect();
        activities.sort_by_key(|a| a.created_at);
        Ok(activities)
    }

    async fn add_history(&self, user_id: Uuid, activity_id: Uuid) -> StoreResult<HistoryEntry> {
        let mut tables = self.inner.lock().await;
        tables.check_refs(user_id, activity_id)?;

        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            user_id,
            activity_id,
            viewed_at: Utc::now(),
        };
        tables.history.push(entry.clone());
        Ok(entry)
    }

    async fn recent_history(&self, user_id: Uuid, limit: i64) -> StoreResult<Vec<Activity>> {
        let tables = self.inner.lock().await;
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(tables
            .history
            .iter()
            .rev()
            .filter(|h| h.user_id == user_id)
            .take(limit)
            .filter_map(|h| tables.live_activity(h.activity_id).cloned())
            .collect())
    }

    async fn upsert_mood(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        mood: &str,
    ) -> StoreResult<MoodStat> {
        let mut tables = self.inner.lock().await;
        if !tables.users.iter().any(|u| u.id == user_id) {
            return Err(StoreError::MissingReference);
        }

        if let Some(existing) = tables
            .moods
            .iter_mut()
            .find(|m| m.user_id == user_id && m.date == date)
        {
            existing.mood = mood.to_string();
            return Ok(existing.clone());
        }

        let stat = MoodStat {
            id: Uuid::new_v4(),
            user_id,
            date,
            mood: mood.to_string(),
        };
        tables.moods.push(stat.clone());
        Ok(stat)
    }

    async fn moods_between(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> StoreResult<Vec<MoodStat>> {
        let tables = self.inner.lock().await;
        let mut stats: Vec<MoodStat> = tables
            .moods
            .iter()
            .filter(|m| m.user_id == user_id && m.date >= from && m.date <= to)
            .cloned()
            .collect();
        stats.sort_by_key(|m| m.date);
        Ok(stats)
    }
}
