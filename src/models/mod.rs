//! Domain models for the Kringle backend.
//!
//! This module contains all database-backed models representing
//! the core entities of the gift-exchange platform.

pub mod exclusion_rule;
pub mod group;
pub mod participant;

// Re-export all models for convenient access
pub use exclusion_rule::ExclusionRule;
pub use group::{Group, GroupSnapshot};
pub use participant::Participant;
