//! Business logic services for the application layer.

pub mod auth_service;
pub mod link_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use link_service::{FREE_TIER_LINK_LIMIT, LinkService};
pub use user_service::UserService;
