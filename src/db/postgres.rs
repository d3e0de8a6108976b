use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{Store, StoreResult};
use crate::models::activity::{Activity, ActivityFilter, ActivityRequest};
use crate::models::favorite::Favorite;
use crate::models::history::HistoryEntry;
use crate::models::mood_stat::MoodStat;
use crate::models::user::{Role, User};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: Role,
    ) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list_activities(&self, filter: &ActivityFilter) -> StoreResult<Vec<Activity>> {
        let mut qb =
            QueryBuilder::<Postgres>::new("SELECT * FROM activities WHERE deleted_at IS NULL");

        if let Some(min) = filter.min_budget {
            qb.push(" AND budget >= ").push_bind(min);
        }
        if let Some(max) = filter.max_budget {
            qb.push(" AND budget <= ").push_bind(max);
        }
        if let Some(time) = filter.time {
            qb.push(" AND time = ").push_bind(time);
        }
        if let Some(mood) = &filter.mood {
            qb.push(" AND ").push_bind(mood.clone()).push(" = ANY(moods)");
        }
        if let Some(weather) = &filter.weather {
            qb.push(" AND weather = ").push_bind(weather.clone());
        }
        if let Some(people) = filter.people_count {
            qb.push(" AND people_count = ").push_bind(people);
        }
        qb.push(" ORDER BY created_at ASC");

        let activities = qb
            .build_query_as::<Activity>()
            .fetch_all(&self.pool)
            .await?;
        Ok(activities)
    }

    async fn get_activity(&self, id: Uuid) -> StoreResult<Option<Activity>> {
        let activity = sqlx::query_as::<_, Activity>(
            "SELECT * FROM activities WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(activity)
    }

    async fn create_activity(&self, input: &ActivityRequest) -> StoreResult<Activity> {
        let activity = sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities (id, name, description, budget, time, weather, people_count, moods)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.budget)
        .bind(input.time)
        .bind(&input.weather)
        .bind(input.people_count)
        .bind(&input.moods)
        .fetch_one(&self.pool)
        .await?;
        Ok(activity)
    }

    async fn update_activity(
        &self,
        id: Uuid,
        input: &ActivityRequest,
    ) -> StoreResult<Option<Activity>> {
        let activity = sqlx::query_as::<_, Activity>(
            r#"
            UPDATE activities SET
                name = $2,
                description = $3,
                budget = $4,
                time = $5,
                weather = $6,
                people_count = $7,
                moods = $8
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.budget)
        .bind(input.time)
        .bind(&input.weather)
        .bind(input.people_count)
        .bind(&input.moods)
        .fetch_optional(&self.pool)
        .await?;
        Ok(activity)
    }

    async fn soft_delete_activity(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE activities SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_activities(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM activities")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn add_favorite(&self, user_id: Uuid, activity_id: Uuid) -> StoreResult<Favorite> {
        let favorite = sqlx::query_as::<_, Favorite>(
            r#"
            INSERT INTO favorites (user_id, activity_id)
            VALUES ($1, $2)
            RETURNING user_id, activity_id
            "#,
        )
        .bind(user_id)
        .bind(activity_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(favorite)
    }

    async fn remove_favorite(&self, user_id: Uuid, activity_id: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND activity_id = $2")
            .bind(user_id)
            .bind(activity_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_favorites(&self, user_id: Uuid) -> StoreResult<Vec<Activity>> {
        let activities = sqlx::query_as::<_, Activity>(
            r#"
            SELECT a.* FROM favorites f
            JOIN activities a ON a.id = f.activity_id
            WHERE f.user_id = $1 AND a.deleted_at IS NULL
            ORDER BY a.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(activities)
    }

    async fn add_history(&self, user_id: Uuid, activity_id: Uuid) -> StoreResult<HistoryEntry> {
        let entry = sqlx::query_as::<_, HistoryEntry>(
            r#"
            INSERT INTO history (id, user_id, activity_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(activity_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(entry)
    }

    async fn recent_history(&self, user_id: Uuid, limit: i64) -> StoreResult<Vec<Activity>> {
        let activities = sqlx::query_as::<_, Activity>(
            r#"
            SELECT a.* FROM (
                SELECT activity_id, viewed_at FROM history
                WHERE user_id = $1
                ORDER BY viewed_at DESC
                LIMIT $2
            ) h
            JOIN activities a ON a.id = h.activity_id
            WHERE a.deleted_at IS NULL
            ORDER BY h.viewed_at DESC
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(activities)
    }

    async fn upsert_mood(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        mood: &str,
    ) -> StoreResult<MoodStat> {
        let stat = sqlx::query_as::<_, MoodStat>(
            r#"
            INSERT INTO mood_stats (id, user_id, date, mood)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, date) DO UPDATE SET
                mood = EXCLUDED.mood,
                updated_at = NOW()
            RETURNING id, user_id, date, mood
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(date)
        .bind(mood)
        .fetch_one(&self.pool)
        .await?;
        Ok(stat)
    }

    async fn moods_between(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> StoreResult<Vec<MoodStat>> {
        let stats = sqlx::query_as::<_, MoodStat>(
            r#"
            SELECT id, user_id, date, mood FROM mood_stats
            WHERE user_id = $1 AND date BETWEEN $2 AND $3
            ORDER BY date ASC
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(stats)
    }
}
