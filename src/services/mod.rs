pub mod group_service;
pub mod membership_service;

pub use group_service::GroupService;
pub use membership_service::MembershipService;
