//! Kringle Backend Library
//!
//! Core of the Kringle gift-exchange platform: group roster assembly,
//! exclusion rules, and the membership mutation guard that keeps both
//! consistent. Transport adapters (HTTP, auth) live outside this crate
//! and call into the services exposed here.

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult, RemovalError};

use database::Database;
use repositories::*;
use services::{GroupService, MembershipService};
use std::sync::Arc;

/// Application state containing all repositories and services
pub struct AppState {
    pub database: Database,
    pub group_repo: Arc<GroupRepository>,
    pub participant_repo: Arc<ParticipantRepository>,
    pub exclusion_rule_repo: Arc<ExclusionRuleRepository>,
    pub group_service: Arc<GroupService>,
    pub membership_service: Arc<MembershipService>,
}

impl AppState {
    /// Create a new AppState with initialized repositories and services
    pub fn new(pool: sqlx::PgPool) -> Self {
        let database = Database::new(pool.clone());

        let group_repo = Arc::new(GroupRepository::new(pool.clone()));
        let participant_repo = Arc::new(ParticipantRepository::new(pool.clone()));
        let exclusion_rule_repo = Arc::new(ExclusionRuleRepository::new(pool.clone()));

        let group_service = Arc::new(GroupService::new(
            pool.clone(),
            group_repo.clone(),
            participant_repo.clone(),
            exclusion_rule_repo.clone(),
        ));
        let membership_service = Arc::new(MembershipService::new(
            pool,
            group_repo.clone(),
            participant_repo.clone(),
            exclusion_rule_repo.clone(),
        ));

        Self {
            database,
            group_repo,
            participant_repo,
            exclusion_rule_repo,
            group_service,
            membership_service,
        }
    }
}
