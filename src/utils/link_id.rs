//! Deterministic short identifier derivation.
//!
//! A link identifier is a pure function of the original URL and the owner:
//! resubmitting the same URL as the same owner always lands on the same
//! identifier, which the store then rejects as a duplicate.
//!
//! Nine base-64 characters carry 54 bits of the digest. Collisions between
//! different `(url, owner)` pairs are therefore possible at scale; they surface
//! as [`crate::error::AppError::Conflict`] on insert, never as an overwrite.

use base64::Engine as _;
use sha2::{Digest, Sha256};

/// Length of every derived link identifier.
pub const LINK_ID_LENGTH: usize = 9;

/// Derives the short identifier for `original_url` submitted by `owner_id`.
///
/// Computes SHA-256 over the URL bytes followed by the owner bytes, encodes
/// the digest as URL-safe base64 without padding and keeps the first
/// [`LINK_ID_LENGTH`] characters.
///
/// # Examples
///
/// ```
/// use link_registry::utils::link_id::{derive_link_id, LINK_ID_LENGTH};
///
/// let a = derive_link_id("https://example.com", "owner-1");
/// let b = derive_link_id("https://example.com", "owner-1");
///
/// assert_eq!(a, b);
/// assert_eq!(a.len(), LINK_ID_LENGTH);
/// ```
pub fn derive_link_id(original_url: &str, owner_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(original_url.as_bytes());
    hasher.update(owner_id.as_bytes());
    let digest = hasher.finalize();

    let mut encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest);
    encoded.truncate(LINK_ID_LENGTH);
    encoded
}

/// Returns true if `candidate` has the shape of a derived identifier.
///
/// Used to reject obviously malformed path segments before touching the store.
pub fn is_well_formed(candidate: &str) -> bool {
    candidate.len() == LINK_ID_LENGTH
        && candidate
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
