use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Marker carried by every hashed secret. Anything stored without it is a
/// legacy plaintext value left over from before hashing was introduced.
const HASH_PREFIX: &str = "$argon2";

pub fn is_hashed(stored: &str) -> bool {
    stored.starts_with(HASH_PREFIX)
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
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

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Result of checking a candidate against a stored secret. `rehashed`
/// carries the replacement hash when a legacy plaintext value matched;
/// the caller must persist it before reporting the login as successful.
#[derive(Debug)]
pub struct VerifyOutcome {
    pub matched: bool,
    pub rehashed: Option<String>,
}

/// Hash-aware verification with lazy format migration. Hashed secrets
/// are verified via argon2 and never rewritten; legacy plaintext secrets
/// are compared byte-for-byte and, on match only, upgraded to a hash.
pub fn verify_stored(stored: &str, candidate: &str) -> anyhow::Result<VerifyOutcome> {
    if is_hashed(stored) {
        return Ok(VerifyOutcome {
            matched: verify_password(candidate, stored)?,
            rehashed: None,
        });
    }
    if stored.as_bytes() == candidate.as_bytes() {
        Ok(VerifyOutcome {
            matched: true,
            rehashed: Some(hash_password(candidate)?),
        })
    } else {
        Ok(VerifyOutcome {
            matched: false,
            rehashed: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(is_hashed(&hash));
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn hashed_secret_matches_without_migration() {
        let hash = hash_password("abc123").unwrap();
        let outcome = verify_stored(&hash, "abc123").unwrap();
        assert!(outcome.matched);
        assert!(outcome.rehashed.is_none());
    }

    #[test]
    fn legacy_secret_migrates_on_match() {
        let outcome = verify_stored("abc123", "abc123").unwrap();
        assert!(outcome.matched);
        let novo = outcome.rehashed.expect("legacy match must produce a hash");
        assert!(is_hashed(&novo));
        assert!(verify_password("abc123", &novo).unwrap());

        // Once stored, the next verification takes the hashed path and
        // produces no further rewrite.
        let again = verify_stored(&novo, "abc123").unwrap();
        assert!(again.matched);
        assert!(again.rehashed.is_none());
    }

    #[test]
    fn legacy_secret_mismatch_never_mutates() {
        let outcome = verify_stored("abc123", "errada").unwrap();
        assert!(!outcome.matched);
        assert!(outcome.rehashed.is_none());
    }

    #[test]
    fn hashed_secret_mismatch_never_mutates() {
        let hash = hash_password("abc123").unwrap();
        let outcome = verify_stored(&hash, "errada").unwrap();
        assert!(!outcome.matched);
        assert!(outcome.rehashed.is_none());
    }
}
