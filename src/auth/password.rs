use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

pub use argon2::password_hash::Error;

/// Hashes `password` with a fresh random salt. Returns a PHC-format string.
///
/// CPU bound, call it from a blocking task.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// `Ok(false)` on mismatch, `Err` only when the stored hash cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, Error> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hash = hash_password("pw1").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("pw1", &hash).unwrap());
        assert!(!verify_password("pw2", &hash).unwrap());
    }

    #[test]
    fn same_password_gets_different_salts() {
        let first = hash_password("pw1").unwrap();
        let second = hash_password("pw1").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("pw1", "not-a-phc-string").is_err());
    }
}
