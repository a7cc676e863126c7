use crate::error::{RemovalError, RepositoryError};
use crate::models::GroupSnapshot;
use crate::repositories::{ExclusionRuleRepository, GroupRepository, ParticipantRepository};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Service for membership-changing operations on a group.
///
/// All mutation goes through here rather than through the repositories
/// directly, so the exclusion-rule cascade always commits or rolls back
/// together with the membership change.
pub struct MembershipService {
    pool: PgPool,
    group_repo: Arc<GroupRepository>,
    participant_repo: Arc<ParticipantRepository>,
    exclusion_rule_repo: Arc<ExclusionRuleRepository>,
}

impl MembershipService {
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

    /// Remove a participant from a group.
    ///
    /// Only the organizer may remove participants, and only while the
    /// draw has not run. On success the membership row and every
    /// exclusion rule referencing the removed user are deleted in one
    /// transaction; on any failure nothing is changed.
    pub async fn remove_participant(
        &self,
        group_id: Uuid,
        user_to_remove: Uuid,
        requested_by: Uuid,
    ) -> Result<(), RemovalError> {
        let mut tx = self.pool.begin().await.map_err(RepositoryError::from)?;

        let snapshot = self
            .group_repo
            .load_for_update(&mut tx, group_id)
            .await?
            .ok_or(RemovalError::GroupNotFound)?;

        authorize_removal(&snapshot, user_to_remove, requested_by)?;

        let removed = self
            .participant_repo
            .remove(&mut tx, group_id, user_to_remove)
            .await?;
        if !removed {
            // The snapshot was read under the group row lock, so the
            // membership row cannot vanish between the check and the
            // delete. Dropping the transaction rolls everything back.
            return Err(RemovalError::ParticipantNotFound);
        }

        let rules_dropped = self
            .exclusion_rule_repo
            .delete_referencing(&mut tx, group_id, user_to_remove)
            .await?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!(
            "Removed participant {} from group {} ({} exclusion rules dropped)",
            user_to_remove, group_id, rules_dropped
        );
        Ok(())
    }
}

/// Guard chain for participant removal, evaluated in order against one
/// snapshot of group state. The order is part of the service contract:
/// when several conditions hold at once, the first match decides which
/// error the caller sees, and the authorization check comes before any
/// business rule so a non-organizer learns nothing about the group.
fn authorize_removal(
    snapshot: &GroupSnapshot,
    user_to_remove: Uuid,
    requested_by: Uuid,
) -> Result<(), RemovalError> {
    if !snapshot.is_organizer(requested_by) {
        return Err(RemovalError::NotOrganizer);
    }
    if snapshot.has_draw_completed() {
        return Err(RemovalError::DrawAlreadyCompleted);
    }
    if snapshot.is_organizer(user_to_remove) {
        return Err(RemovalError::CannotRemoveOrganizer);
    }
    if !snapshot.has_participant(user_to_remove) {
        return Err(RemovalError::ParticipantNotFound);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Group;

    struct Fixture {
        organizer: Uuid,
        member: Uuid,
        snapshot: GroupSnapshot,
    }

    fn forming_snapshot() -> Fixture {
        let organizer = Uuid::new_v4();
        let member = Uuid::new_v4();
        let group = Group::new("Team Exchange".to_string(), organizer);
        Fixture {
            organizer,
            member,
            snapshot: GroupSnapshot::new(group, [organizer, member]),
        }
    }

    fn drawn_snapshot() -> Fixture {
        let organizer = Uuid::new_v4();
        let member = Uuid::new_v4();
        let mut group = Group::new("Team Exchange".to_string(), organizer);
        group.drawn_at = Some(chrono::Utc::now().naive_utc());
        Fixture {
            organizer,
            member,
            snapshot: GroupSnapshot::new(group, [organizer, member]),
        }
    }

    #[test]
    fn test_organizer_may_remove_member() {
        let f = forming_snapshot();
        assert!(authorize_removal(&f.snapshot, f.member, f.organizer).is_ok());
    }

    #[test]
    fn test_non_organizer_is_rejected() {
        let f = forming_snapshot();
        let result = authorize_removal(&f.snapshot, f.member, f.member);
        assert!(matches!(result, Err(RemovalError::NotOrganizer)));
    }

    #[test]
    fn test_non_member_requester_is_rejected() {
        let f = forming_snapshot();
        let result = authorize_removal(&f.snapshot, f.member, Uuid::new_v4());
        assert!(matches!(result, Err(RemovalError::NotOrganizer)));
    }

    #[test]
    fn test_frozen_group_rejects_removal() {
        let f = drawn_snapshot();
        let result = authorize_removal(&f.snapshot, f.member, f.organizer);
        assert!(matches!(result, Err(RemovalError::DrawAlreadyCompleted)));
    }

    #[test]
    fn test_organizer_cannot_remove_themselves() {
        let f = forming_snapshot();
        let result = authorize_removal(&f.snapshot, f.organizer, f.organizer);
        assert!(matches!(result, Err(RemovalError::CannotRemoveOrganizer)));
    }

    #[test]
    fn test_unknown_target_is_rejected() {
        let f = forming_snapshot();
        let result = authorize_removal(&f.snapshot, Uuid::new_v4(), f.organizer);
        assert!(matches!(result, Err(RemovalError::ParticipantNotFound)));
    }

    #[test]
    fn test_authorization_outranks_frozen_group() {
        // Non-organizer requester against a drawn group: the requester
        // must see the permission failure, not the draw state.
        let f = drawn_snapshot();
        let result = authorize_removal(&f.snapshot, f.member, f.member);
        assert!(matches!(result, Err(RemovalError::NotOrganizer)));
    }

    #[test]
    fn test_frozen_group_outranks_organizer_target() {
        // Removing the organizer from a drawn group reports the freeze,
        // not the organizer rule.
        let f = drawn_snapshot();
        let result = authorize_removal(&f.snapshot, f.organizer, f.organizer);
        assert!(matches!(result, Err(RemovalError::DrawAlreadyCompleted)));
    }

    #[test]
    fn test_organizer_rule_outranks_membership_lookup() {
        // The organizer is always a member, so the dedicated error must
        // win over ParticipantNotFound ever being considered; and a
        // target that is both unknown and not the organizer still falls
        // through to ParticipantNotFound.
        let f = forming_snapshot();
        assert!(matches!(
            authorize_removal(&f.snapshot, f.organizer, f.organizer),
            Err(RemovalError::CannotRemoveOrganizer)
        ));
    }

    #[test]
    fn test_failure_is_idempotent_against_unchanged_state() {
        let f = drawn_snapshot();
        let first = authorize_removal(&f.snapshot, f.member, f.organizer);
        let second = authorize_removal(&f.snapshot, f.member, f.organizer);
        assert_eq!(
            std::mem::discriminant(&first.unwrap_err()),
            std::mem::discriminant(&second.unwrap_err())
        );
    }
}
