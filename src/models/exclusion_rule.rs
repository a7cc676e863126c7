use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Exclusion rule model: an unordered pair of participants within one
/// group that must not be matched to each other in the draw.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExclusionRule {
    pub id: Uuid,
    pub group_id: Uuid,
    pub first_user_id: Uuid,
    pub second_user_id: Uuid,
    pub created_at: NaiveDateTime,
}

impl ExclusionRule {
    /// Check if either side of the pair references the given user
    pub fn references(&self, user_id: Uuid) -> bool {
        self.first_user_id == user_id || self.second_user_id == user_id
    }

    /// Canonical storage order for an unordered pair: smaller UUID first.
    pub fn ordered_pair(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_pair_is_direction_independent() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        assert_eq!(
            ExclusionRule::ordered_pair(a, b),
            ExclusionRule::ordered_pair(b, a)
        );
        let (first, second) = ExclusionRule::ordered_pair(a, b);
        assert!(first <= second);
    }

    #[test]
    fn test_references_matches_either_side() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let rule = ExclusionRule {
            id: Uuid::new_v4(),
            group_id: Uuid::new_v4(),
            first_user_id: a,
            second_user_id: b,
            created_at: chrono::Utc::now().naive_utc(),
        };

        assert!(rule.references(a));
        assert!(rule.references(b));
        assert!(!rule.references(Uuid::new_v4()));
    }
}
