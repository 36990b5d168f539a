use argon2::{password_hash::SaltString, Argon2, PasswordHasher};
use rand::rngs::OsRng;
use tracing::error;

/// Hash the user's secret before persistence. The hash is write-only:
/// nothing in the service reads it back.
pub fn hash_secret(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{PasswordHash, PasswordVerifier};

    #[test]
    fn hash_verifies_against_original_secret() {
        let secret = "Secur3P@ssw0rd!";
        let hash = hash_secret(secret).expect("hashing should succeed");
        let parsed = PasswordHash::new(&hash).expect("hash should parse");
        assert!(Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok());
    }

    #[test]
    fn hash_rejects_wrong_secret() {
        let hash = hash_secret("correct-horse-battery-staple").expect("hashing should succeed");
        let parsed = PasswordHash::new(&hash).expect("hash should parse");
        assert!(Argon2::default()
            .verify_password(b"wrong-secret", &parsed)
            .is_err());
    }

    #[test]
    fn hash_is_salted_per_call() {
        let a = hash_secret("same-input").expect("hashing should succeed");
        let b = hash_secret("same-input").expect("hashing should succeed");
        assert_ne!(a, b);
    }
}
