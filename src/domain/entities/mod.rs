//! Core domain entities.
//!
//! - [`Link`] - A shortened URL owned by a user
//! - [`User`] - A registered user with entitlement flags
//!
//! Creation inputs live in separate structs (`NewLink`, `NewUser`) so the
//! store stays the only source of generated columns.

pub mod link;
pub mod user;

pub use link::{Link, NewLink};
pub use user::{NewUser, User};
