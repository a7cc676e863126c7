use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Participant model representing a user's membership in a group.
///
/// Created when a user joins a group; destroyed only by explicit removal
/// or when the whole group is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Participant {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub joined_at: NaiveDateTime,
}
