use crate::error::RepositoryError;
use crate::models::ExclusionRule;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Repository for exclusion rule data access
pub struct ExclusionRuleRepository {
    pool: PgPool,
}

impl ExclusionRuleRepository {
    /// Create a new ExclusionRuleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an exclusion rule within the caller's transaction.
    ///
    /// The pair is stored in canonical order, so inserting the same pair
    /// in either direction surfaces as `RepositoryError::Duplicate`.
    pub async fn add(
        &self,
        conn: &mut PgConnection,
        group_id: Uuid,
        first_user_id: Uuid,
        second_user_id: Uuid,
    ) -> Result<ExclusionRule, RepositoryError> {
        let (first, second) = ExclusionRule::ordered_pair(first_user_id, second_user_id);

        let rule = sqlx::query_as::<_, ExclusionRule>(
            r#"
            INSERT INTO exclusion_rules (group_id, first_user_id, second_user_id)
            VALUES ($1, $2, $3)
            RETURNING id, group_id, first_user_id, second_user_id, created_at
            "#,
        )
        .bind(group_id)
        .bind(first)
        .bind(second)
        .fetch_one(&mut *conn)
        .await?;

        Ok(rule)
    }

    /// Find all exclusion rules of a group
    pub async fn find_by_group(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<ExclusionRule>, RepositoryError> {
        let rules = sqlx::query_as::<_, ExclusionRule>(
            r#"
            SELECT id, group_id, first_user_id, second_user_id, created_at
            FROM exclusion_rules
            WHERE group_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rules)
    }

    /// Delete every exclusion rule in a group that references the given
    /// user on either side. One set-based statement, zero or more rows;
    /// runs within the caller's transaction. Returns the number of rules
    /// deleted.
    pub async fn delete_referencing(
        &self,
        conn: &mut PgConnection,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<u64, RepositoryError> {
        let rows_affected = sqlx::query(
            r#"
            DELETE FROM exclusion_rules
            WHERE group_id = $1 AND (first_user_id = $2 OR second_user_id = $2)
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

        Ok(rows_affected)
    }
}
