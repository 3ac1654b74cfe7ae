//! bcrypt password hashing.

use anyhow::{Context, Result};

pub const DEFAULT_BCRYPT_COST: u32 = 8;

/// Hash `password` with the given work factor.
///
/// # Errors
/// Returns an error if the cost is out of range (4..=31).
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    bcrypt::hash(password, cost).context("failed to hash password")
}

/// Compare `password` against a stored bcrypt hash.
///
/// # Errors
/// Returns an error if the stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    bcrypt::verify(password, hash).context("failed to verify password")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() -> Result<()> {
        let hash = hash_password("pw123", 4)?;
        assert!(hash.starts_with("$2"));
        assert!(verify_password("pw123", &hash)?);
        assert!(!verify_password("pw124", &hash)?);
        Ok(())
    }

    #[test]
    fn hash_rejects_invalid_cost() {
        assert!(hash_password("pw123", 3).is_err());
        assert!(hash_password("pw123", 32).is_err());
    }

    #[test]
    fn verify_rejects_malformed_hash() {
        assert!(verify_password("pw123", "not-a-hash").is_err());
    }
}
