use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, FromRow, PartialEq, Eq, Hash)]
pub struct Favorite {
    pub user_id: Uuid,
    pub activity_id: Uuid,
}
