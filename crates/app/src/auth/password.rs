//! Salted password digests for locally stored accounts.

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;

/// Hex-encoded salt and SHA-256 digest of `salt || password`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHash {
    salt: String,
    digest: String,
}

impl PasswordHash {
    /// Hashes `password` under a fresh random salt.
    #[must_use]
    pub fn new(password: &str) -> Self {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);

        Self {
            salt: hex::encode(salt),
            digest: digest(&salt, password),
        }
    }

    /// Whether `password` produces the stored digest.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        let Ok(salt) = hex::decode(&self.salt) else {
            return false;
        };

        let candidate = digest(&salt, password);

        candidate.len() == self.digest.len()
            && candidate
                .bytes()
                .zip(self.digest.bytes())
                .fold(0u8, |diff, (a, b)| diff | (a ^ b))
                == 0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHash").finish_non_exhaustive()
    }
}

fn digest(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());

    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn matching_password_verifies() {
        let hash = PasswordHash::new("secret");

        assert!(hash.verify("secret"));
        assert!(!hash.verify("Secret"));
        assert!(!hash.verify(""));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let first = PasswordHash::new("secret");
        let second = PasswordHash::new("secret");

        assert_ne!(first, second);
        assert!(second.verify("secret"));
    }

    #[test]
    fn serialized_form_does_not_contain_the_password() -> TestResult {
        let json = serde_json::to_string(&PasswordHash::new("hunter22"))?;

        assert!(!json.contains("hunter22"), "plain password in {json}");

        let restored: PasswordHash = serde_json::from_str(&json)?;

        assert!(restored.verify("hunter22"));

        Ok(())
    }

    #[test]
    fn corrupt_salt_never_verifies() -> TestResult {
        let hash: PasswordHash =
            serde_json::from_str(r#"{"salt":"not-hex","digest":"00"}"#)?;

        assert!(!hash.verify("anything"));

        Ok(())
    }
}
