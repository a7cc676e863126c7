use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashSet;
use uuid::Uuid;

/// Group model representing one gift exchange
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub organizer_id: Uuid,
    /// Set exactly once when the draw runs; never cleared.
    pub drawn_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl Group {
    /// Create a new Group (typically used for creating from API input)
    pub fn new(name: String, organizer_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            organizer_id,
            drawn_at: None,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Check if the given user is the group's organizer
    pub fn is_organizer(&self, user_id: Uuid) -> bool {
        self.organizer_id == user_id
    }

    /// Check if the draw has already run for this group
    pub fn has_draw_completed(&self) -> bool {
        self.drawn_at.is_some()
    }
}

/// Authoritative group state as loaded for one mutation attempt.
///
/// Combines the group row with the full membership set, read inside the
/// same transaction that performs the mutation so that every guard is
/// evaluated against a single consistent view.
#[derive(Debug, Clone)]
pub struct GroupSnapshot {
    group: Group,
    members: HashSet<Uuid>,
}

impl GroupSnapshot {
    pub fn new(group: Group, members: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            group,
            members: members.into_iter().collect(),
        }
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn organizer_id(&self) -> Uuid {
        self.group.organizer_id
    }

    /// Check if the given user is the group's organizer
    pub fn is_organizer(&self, user_id: Uuid) -> bool {
        self.group.is_organizer(user_id)
    }

    /// Check if the draw has already run for this group
    pub fn has_draw_completed(&self) -> bool {
        self.group.has_draw_completed()
    }

    /// Check if the given user is currently a member of the group
    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.members.contains(&user_id)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_queries() {
        let organizer = Uuid::new_v4();
        let member = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        let group = Group::new("Office Exchange".to_string(), organizer);
        let snapshot = GroupSnapshot::new(group, [organizer, member]);

        assert!(snapshot.is_organizer(organizer));
        assert!(!snapshot.is_organizer(member));
        assert!(!snapshot.has_draw_completed());
        assert!(snapshot.has_participant(organizer));
        assert!(snapshot.has_participant(member));
        assert!(!snapshot.has_participant(stranger));
        assert_eq!(snapshot.member_count(), 2);
    }

    #[test]
    fn test_draw_marker() {
        let mut group = Group::new("Family".to_string(), Uuid::new_v4());
        assert!(!group.has_draw_completed());

        group.drawn_at = Some(chrono::Utc::now().naive_utc());
        assert!(group.has_draw_completed());
    }

    #[test]
    fn test_group_serialization_shape() {
        let group = Group::new("Family".to_string(), Uuid::new_v4());
        let json = serde_json::to_value(&group).unwrap();

        // A group that has not drawn yet reports an explicit null marker.
        assert!(json.get("drawn_at").unwrap().is_null());
        assert_eq!(json.get("name").unwrap(), "Family");
    }
}
