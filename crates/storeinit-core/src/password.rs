//! Password hashing for provisioned accounts.
//!
//! Hashes are stored in Django's `<algorithm>$<hash>` layout so the host web
//! application can verify them with its bcrypt hasher enabled.

use crate::CoreError;

pub const HASH_ALGORITHM: &str = "bcrypt";

/// Hash `password` with bcrypt at the given cost.
///
/// # Errors
///
/// Returns [`CoreError::PasswordHash`] if bcrypt rejects the cost.
pub fn hash_password(password: &str, cost: u32) -> Result<String, CoreError> {
    let hashed = bcrypt::hash(password, cost)?;
    Ok(format!("{HASH_ALGORITHM}${hashed}"))
}

/// Check `password` against a hash produced by [`hash_password`].
///
/// # Errors
///
/// Returns [`CoreError::UnsupportedHashFormat`] if `encoded` is not a
/// `bcrypt$` hash, or [`CoreError::PasswordHash`] if the hash is malformed.
pub fn verify_password(password: &str, encoded: &str) -> Result<bool, CoreError> {
    let hashed = encoded
        .strip_prefix(HASH_ALGORITHM)
        .and_then(|rest| rest.strip_prefix('$'))
        .ok_or(CoreError::UnsupportedHashFormat)?;
    Ok(bcrypt::verify(password, hashed)?)
}
