//! Utility functions shared across layers.
//!
//! - [`link_id`] - Deterministic short identifier derivation
//! - [`password`] - bcrypt password hashing

pub mod link_id;
pub mod password;
