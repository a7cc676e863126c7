use kringle_backend::models::Group;
use kringle_backend::AppState;
use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;

/// Test harness bundling the application state for one test database
pub struct TestDatabase {
    pub pool: PgPool,
    pub state: AppState,
}

impl TestDatabase {
    /// Create a TestDatabase from a pool (injected by sqlx::test)
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool: pool.clone(),
            state: AppState::new(pool),
        }
    }
}

/// A group in `Forming` with organizer O and members {O, A, B}, plus an
/// exclusion rule between A and B
pub struct ExchangeFixture {
    pub group: Group,
    pub organizer: Uuid,
    pub alice: Uuid,
    pub bob: Uuid,
}

pub async fn forming_group(db: &TestDatabase) -> ExchangeFixture {
    let organizer = Uuid::new_v4();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let group = db
        .state
        .group_service
        .create_group("Holiday Exchange", organizer)
        .await
        .expect("Failed to create group");

    db.state
        .group_service
        .join_group(group.id, alice)
        .await
        .expect("Failed to add alice");
    db.state
        .group_service
        .join_group(group.id, bob)
        .await
        .expect("Failed to add bob");

    db.state
        .group_service
        .add_exclusion_rule(group.id, alice, bob, organizer)
        .await
        .expect("Failed to add exclusion rule");

    ExchangeFixture {
        group,
        organizer,
        alice,
        bob,
    }
}

/// Current member user ids of a group
pub async fn member_ids(db: &TestDatabase, group_id: Uuid) -> HashSet<Uuid> {
    db.state
        .participant_repo
        .find_by_group(group_id)
        .await
        .expect("Failed to list participants")
        .into_iter()
        .map(|p| p.user_id)
        .collect()
}

/// Freeze a group by setting its draw-completion marker
pub async fn complete_draw(db: &TestDatabase, group_id: Uuid) {
    let updated = db
        .state
        .group_repo
        .mark_draw_completed(group_id)
        .await
        .expect("Failed to mark draw completed");
    assert!(updated, "Draw marker should have been set");
}
