use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::mood_stat::MAX_MOOD_LEN;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Activity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub budget: Option<i32>,
    /// Expected duration in hours.
    pub time: Option<i32>,
    pub weather: Option<String>,
    pub people_count: Option<i32>,
    pub moods: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Body of POST /api/activities and PUT /api/activities/{id}.
///
/// An update replaces every mutable field with what is sent here; omitted
/// optional fields are cleared.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ActivityRequest {
    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub name: String,

    pub description: Option<String>,

    #[validate(range(min = 0, message = "Budget must not be negative"))]
    pub budget: Option<i32>,

    #[validate(range(min = 0, message = "Time must not be negative"))]
    pub time: Option<i32>,

    #[validate(length(max = 16, message = "Weather must be at most 16 characters"))]
    pub weather: Option<String>,

    #[validate(range(min = 0, message = "People count must not be negative"))]
    pub people_count: Option<i32>,

    #[serde(default)]
    #[validate(custom = "validate_mood_tags")]
    pub moods: Vec<String>,
}

fn validate_mood_tags(moods: &Vec<String>) -> Result<(), ValidationError> {
    let bad = moods
        .iter()
        .any(|m| m.trim().is_empty() || m.chars().count() > MAX_MOOD_LEN);
    if bad {
        return Err(ValidationError::new("mood_tag_length"));
    }
    Ok(())
}

/// Raw query string of GET /api/activities.
///
/// Every parameter is kept as text so that a malformed value can be dropped
/// instead of rejecting the whole request.
#[derive(Debug, Default)]
pub struct ActivityQuery {
    pub min_budget: Option<String>,
    pub max_budget: Option<String>,
    pub time: Option<String>,
    pub mood: Option<String>,
    pub weather: Option<String>,
    pub people_count: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityFilter {
    pub min_budget: Option<i32>,
    pub max_budget: Option<i32>,
    pub time: Option<i32>,
    pub mood: Option<String>,
    pub weather: Option<String>,
    pub people_count: Option<i32>,
}

impl ActivityQuery {
    /// Collects decoded query pairs. The first occurrence of a key wins and
    /// unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "min_budget" => &mut query.min_budget,
                "max_budget" => &mut query.max_budget,
                "time" => &mut query.time,
                "mood" => &mut query.mood,
                "weather" => &mut query.weather,
                "people_count" => &mut query.people_count,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    pub fn into_filter(self) -> ActivityFilter {
        ActivityFilter {
            min_budget: parse_int(self.min_budget),
            max_budget: parse_int(self.max_budget),
            time: parse_int(self.time),
            mood: non_blank(self.mood).filter(|m| m.chars().count() <= MAX_MOOD_LEN),
            weather: non_blank(self.weather),
            people_count: parse_int(self.people_count),
        }
    }
}

fn parse_int(raw: Option<String>) -> Option<i32> {
    raw.and_then(|v| v.trim().parse().ok())
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl ActivityFilter {
    /// Evaluates the filter against one row the same way the SQL query does:
    /// a missing column never satisfies a present filter.
    pub fn matches(&self, activity: &Activity) -> bool {
        fn cmp(value: Option<i32>, bound: Option<i32>, ok: impl Fn(i32, i32) -> bool) -> bool {
            match bound {
                None => true,
                Some(b) => value.map_or(false, |v| ok(v, b)),
            }
        }

        cmp(activity.budget, self.min_budget, |v, b| v >= b)
            && cmp(activity.budget, self.max_budget, |v, b| v <= b)
            && cmp(activity.time, self.time, |v, b| v == b)
            && cmp(activity.people_count, self.people_count, |v, b| v == b)
            && self
                .weather
                .as_ref()
                .map_or(true, |w| activity.weather.as_ref() == Some(w))
            && self
                .mood
                .as_ref()
                .map_or(true, |m| activity.moods.contains(m))
    }
}
