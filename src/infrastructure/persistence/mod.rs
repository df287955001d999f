//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with bound
//! parameters. Row structs stay private to this module and convert into domain
//! entities.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Links, quota-checked creation and visit accounting
//! - [`PgUserRepository`] - User accounts and entitlements
//! - [`PgSessionRepository`] - Session token storage and lookup

pub mod pg_link_repository;
pub mod pg_session_repository;
pub mod pg_user_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_session_repository::PgSessionRepository;
pub use pg_user_repository::PgUserRepository;
