use crate::error::RepositoryError;
use crate::models::Participant;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Repository for participant membership data access
pub struct ParticipantRepository {
    pool: PgPool,
}

impl ParticipantRepository {
    /// Create a new ParticipantRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add a participant to a group.
    ///
    /// Runs within the caller's transaction; a duplicate membership
    /// surfaces as `RepositoryError::Duplicate` via the composite key.
    pub async fn add(
        &self,
        conn: &mut PgConnection,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<Participant, RepositoryError> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            INSERT INTO participants (group_id, user_id)
            VALUES ($1, $2)
            RETURNING group_id, user_id, joined_at
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(participant)
    }

    /// Remove a participant from a group within the caller's transaction
    pub async fn remove(
        &self,
        conn: &mut PgConnection,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, RepositoryError> {
        let rows_affected = sqlx::query(
            r#"
            DELETE FROM participants
            WHERE group_id = $1 AND user_id = $2
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

        Ok(rows_affected > 0)
    }

    /// Find all participants of a group
    pub async fn find_by_group(&self, group_id: Uuid) -> Result<Vec<Participant>, RepositoryError> {
        let participants = sqlx::query_as::<_, Participant>(
            r#"
            SELECT group_id, user_id, joined_at
            FROM participants
            WHERE group_id = $1
            ORDER BY joined_at ASC
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(participants)
    }

    /// Check if a user is a member of a group
    pub async fn is_member(&self, group_id: Uuid, user_id: Uuid) -> Result<bool, RepositoryError> {
        let found = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT 1
            FROM participants
            WHERE group_id = $1 AND user_id = $2
            LIMIT 1
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(found.is_some())
    }
}
