pub mod exclusion_rule_repository;
pub mod group_repository;
pub mod participant_repository;

// Re-export all repositories for convenient access
pub use exclusion_rule_repository::ExclusionRuleRepository;
pub use group_repository::GroupRepository;
pub use participant_repository::ParticipantRepository;
