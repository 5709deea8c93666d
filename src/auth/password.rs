use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier as _, Version};
use rand::rngs::OsRng;
use std::sync::Arc;

use super::AuthError;
use crate::config::SecurityConfig;

/// One-way password hashing. Implementations must salt every hash and
/// verify in constant time.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, AuthError>;

    /// False on mismatch or on a hash string that cannot be parsed
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}

/// Argon2id with a per-hash random salt, stored as a PHC string
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AuthError::Hashing(format!("invalid argon2 parameters: {}", e)))?;
        Ok(Self { params })
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, AuthError> {
        Self::new(
            config.argon2_memory_kib,
            config.argon2_iterations,
            config.argon2_parallelism,
        )
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        // Cost parameters come from the PHC string, so hashes made under an
        // older config still verify.
        PasswordHash::new(hash)
            .ok()
            .map(|parsed| self.argon2().verify_password(plaintext.as_bytes(), &parsed).is_ok())
            .unwrap_or(false)
    }
}

/// Hash on the blocking pool; argon2 is deliberately slow and memory-hard.
pub async fn hash_blocking(
    hasher: Arc<dyn PasswordHasher>,
    plaintext: String,
) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
        .await
        .map_err(|e| AuthError::Hashing(format!("hashing task failed: {}", e)))?
}

pub async fn verify_blocking(
    hasher: Arc<dyn PasswordHasher>,
    plaintext: String,
    hash: String,
) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hash))
        .await
        .map_err(|e| AuthError::Hashing(format!("verification task failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Argon2Hasher {
        Argon2Hasher::new(8, 1, 1).unwrap()
    }

    #[test]
    fn hash_then_verify() {
        let hasher = cheap();
        let hash = hasher.hash("pw1").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("pw1"));
        assert!(hasher.verify("pw1", &hash));
        assert!(!hasher.verify("pw2", &hash));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let hasher = cheap();
        assert_ne!(hasher.hash("pw1").unwrap(), hasher.hash("pw1").unwrap());
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!cheap().verify("pw1", "not-a-phc-string"));
        assert!(!cheap().verify("", ""));
    }

    #[test]
    fn verifies_hashes_made_with_other_params() {
        let old = Argon2Hasher::new(16, 2, 1).unwrap();
        let hash = old.hash("pw1").unwrap();
        assert!(cheap().verify("pw1", &hash));
    }

    #[test]
    fn rejects_invalid_params() {
        assert!(matches!(Argon2Hasher::new(0, 0, 0), Err(AuthError::Hashing(_))));
    }

    #[tokio::test]
    async fn blocking_helpers_round_trip() {
        let hasher: Arc<dyn PasswordHasher> = Arc::new(cheap());
        let hash = hash_blocking(hasher.clone(), "pw1".into()).await.unwrap();

        assert!(verify_blocking(hasher.clone(), "pw1".into(), hash.clone()).await.unwrap());
        assert!(!verify_blocking(hasher, "nope".into(), hash).await.unwrap());
    }
}
