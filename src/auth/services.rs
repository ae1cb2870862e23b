use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use regex::Regex;
use tracing::error;

/// Minimum password length, in characters.
pub(crate) const MIN_PASSWORD_CHARS: usize = 8;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub(crate) fn password_long_enough(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_CHARS
}

/// Argon2id hash with a fresh random salt, in PHC string form.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!(error = %e, "password hashing failed");
            anyhow::anyhow!("hash password: {e}")
        })
}

/// `Ok(false)` for a wrong password; `Err` only when the stored hash is unreadable.
pub fn verify_password(plain: &str, stored_hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| {
        error!(error = %e, "stored password hash unreadable");
        anyhow::anyhow!("parse password hash: {e}")
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_account_password_verifies() {
        let stored = hash_password("password").unwrap();
        assert!(stored.starts_with("$argon2"));
        assert!(verify_password("password", &stored).unwrap());
        assert!(!verify_password("Password", &stored).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        assert_ne!(hash_password("hunter2hunter2").unwrap(), hash_password("hunter2hunter2").unwrap());
    }

    #[test]
    fn unreadable_stored_hash_is_an_error() {
        assert!(verify_password("password", "not-a-phc-string").is_err());
    }

    #[test]
    fn password_length_counts_characters() {
        assert!(password_long_enough("12345678"));
        assert!(!password_long_enough("1234567"));
        // five characters, ten bytes
        assert!(!password_long_enough("ééééé"));
        assert!(password_long_enough("пароль12"));
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("jedi@example.com"));
        assert!(!is_valid_email("jedi@example"));
        assert!(!is_valid_email("jedi example.com"));
    }
}
