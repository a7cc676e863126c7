use crate::error::RepositoryError;
use crate::models::{Group, GroupSnapshot};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Repository for group data access
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    /// Create a new GroupRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new group together with the organizer's membership.
    ///
    /// Both rows are written in one transaction: a group must never exist
    /// without its organizer in the participant set.
    pub async fn create(&self, name: &str, organizer_id: Uuid) -> Result<Group, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let group = sqlx::query_as::<_, Group>(
            r#"
            INSERT INTO groups (name, organizer_id)
            VALUES ($1, $2)
            RETURNING id, name, organizer_id, drawn_at, created_at
            "#,
        )
        .bind(name)
        .bind(organizer_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO participants (group_id, user_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(group.id)
        .bind(organizer_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(group)
    }

    /// Find a group by UUID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, RepositoryError> {
        let group = sqlx::query_as::<_, Group>(
            r#"
            SELECT id, name, organizer_id, drawn_at, created_at
            FROM groups
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    /// Load a group and its full membership set for mutation.
    ///
    /// Takes a row lock on the group, so concurrent mutations of the same
    /// group (including the draw setting the completion marker) serialize
    /// against each other. Must be called within the transaction that
    /// performs the subsequent writes.
    pub async fn load_for_update(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<GroupSnapshot>, RepositoryError> {
        let group = sqlx::query_as::<_, Group>(
            r#"
            SELECT id, name, organizer_id, drawn_at, created_at
            FROM groups
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        let group = match group {
            Some(group) => group,
            None => return Ok(None),
        };

        let members = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT user_id
            FROM participants
            WHERE group_id = $1
            "#,
        )
        .bind(id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(Some(GroupSnapshot::new(group, members)))
    }

    /// Set the draw-completion marker.
    ///
    /// One-shot: only a group that has not drawn yet is updated. Returns
    /// false if the marker was already set or the group does not exist.
    pub async fn mark_draw_completed(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE groups
            SET drawn_at = NOW()
            WHERE id = $1 AND drawn_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows_affected > 0)
    }
}
