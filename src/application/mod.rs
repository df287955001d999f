//! Application layer services implementing business logic.
//!
//! Services consume repository traits and expose the operations HTTP handlers
//! and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link registry: quota, ownership, visit accounting
//! - [`services::user_service::UserService`] - Registration and login
//! - [`services::auth_service::AuthService`] - Session tokens and caller resolution

pub mod services;
