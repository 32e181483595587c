//! Credential hashing.
//!
//! Thin wrapper over bcrypt so the rest of the crate treats hashing as an
//! opaque capability. Verification never errors on a simple mismatch; a
//! damaged digest counts as a failed verification rather than a fault.

use bcrypt::DEFAULT_COST;

use crate::error::ApiError;

/// Hashes a plaintext credential for storage.
pub fn hash_password(plaintext: &str) -> Result<String, ApiError> {
    bcrypt::hash(plaintext, DEFAULT_COST).map_err(|_| ApiError::WeakHash)
}

/// Constant-time comparison of a plaintext against a stored digest.
pub fn verify_password(digest: &str, plaintext: &str) -> bool {
    bcrypt::verify(plaintext, digest).unwrap_or(false)
}
