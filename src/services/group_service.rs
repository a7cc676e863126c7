use crate::error::{AppError, AppResult, RepositoryError};
use crate::models::{ExclusionRule, Group, Participant};
use crate::repositories::{ExclusionRuleRepository, GroupRepository, ParticipantRepository};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Service for assembling a group before the draw: creating the group,
/// letting users join, and recording exclusion rules.
pub struct GroupService {
    pool: PgPool,
    group_repo: Arc<GroupRepository>,
    participant_repo: Arc<ParticipantRepository>,
    exclusion_rule_repo: Arc<ExclusionRuleRepository>,
}

impl GroupService {
    pub fn new(
        pool: PgPool,
        group_repo: Arc<GroupRepository>,
        participant_repo: Arc<ParticipantRepository>,
        exclusion_rule_repo: Arc<ExclusionRuleRepository>,
    ) -> Self {
        Self {
            pool,
            group_repo,
            participant_repo,
            exclusion_rule_repo,
        }
    }

    /// Create a new group. The organizer becomes its first participant.
    pub async fn create_group(&self, name: &str, organizer_id: Uuid) -> AppResult<Group> {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Group name must not be empty".into()));
        }

        let group = self.group_repo.create(name, organizer_id).await?;

        info!("Created group {} ({})", group.name, group.id);
        Ok(group)
    }

    /// Add a user to a group's roster.
    ///
    /// Joining runs under the same group row lock as removal, so it
    /// cannot race the draw: once the completion marker is set the
    /// roster is immutable.
    pub async fn join_group(&self, group_id: Uuid, user_id: Uuid) -> AppResult<Participant> {
        let mut tx = self.pool.begin().await.map_err(RepositoryError::from)?;

        let snapshot = self
            .group_repo
            .load_for_update(&mut tx, group_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Group not found".into()))?;

        if snapshot.has_draw_completed() {
            return Err(AppError::BusinessLogic(
                "The draw has already run; the roster is frozen".into(),
            ));
        }
        if snapshot.has_participant(user_id) {
            return Err(AppError::BusinessLogic(
                "User is already a member of this group".into(),
            ));
        }

        let participant = self.participant_repo.add(&mut tx, group_id, user_id).await?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!("User {} joined group {}", user_id, group_id);
        Ok(participant)
    }

    /// Record an exclusion rule between two participants.
    ///
    /// Organizer-only. Both sides must be current members, a participant
    /// cannot be excluded from themselves, and the same pair (in either
    /// direction) can only be recorded once.
    pub async fn add_exclusion_rule(
        &self,
        group_id: Uuid,
        first_user_id: Uuid,
        second_user_id: Uuid,
        requested_by: Uuid,
    ) -> AppResult<ExclusionRule> {
        if first_user_id == second_user_id {
            return Err(AppError::Validation(
                "An exclusion rule must reference two different participants".into(),
            ));
        }

        let mut tx = self.pool.begin().await.map_err(RepositoryError::from)?;

        let snapshot = self
            .group_repo
            .load_for_update(&mut tx, group_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Group not found".into()))?;

        if !snapshot.is_organizer(requested_by) {
            return Err(AppError::Unauthorized(
                "Only the group organizer can add exclusion rules".into(),
            ));
        }
        if snapshot.has_draw_completed() {
            return Err(AppError::BusinessLogic(
                "The draw has already run; exclusion rules can no longer change".into(),
            ));
        }
        if !snapshot.has_participant(first_user_id) || !snapshot.has_participant(second_user_id) {
            return Err(AppError::Validation(
                "Both sides of an exclusion rule must be current members".into(),
            ));
        }

        let rule = self
            .exclusion_rule_repo
            .add(&mut tx, group_id, first_user_id, second_user_id)
            .await
            .map_err(|e| match e {
                RepositoryError::Duplicate(_) => {
                    AppError::BusinessLogic("An exclusion rule for this pair already exists".into())
                }
                other => AppError::from(other),
            })?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!(
            "Added exclusion rule {} to group {} ({} / {})",
            rule.id, group_id, rule.first_user_id, rule.second_user_id
        );
        Ok(rule)
    }
}
