//! Authentication primitives: login credentials and password hashing.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port. Password
//! hashing delegates to Argon2id and stores PHC-formatted strings.

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash as PhcString, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use zeroize::Zeroizing;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the authentication handlers.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Failures raised while deriving or parsing a password hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// The Argon2 derivation itself failed.
    #[error("password hashing failed: {message}")]
    Derivation { message: String },
    /// A stored hash is not a valid PHC string.
    #[error("stored password hash is malformed: {message}")]
    Malformed { message: String },
}

/// Argon2id password hash in PHC string format.
///
/// Verification never reveals whether the stored hash was malformed versus
/// simply not matching; both cases read as a failed login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash a raw password with a fresh random salt.
    pub fn derive(password: &str) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::Derivation {
                message: err.to_string(),
            })?;
        Ok(Self(hash.to_string()))
    }

    /// Wrap a PHC string loaded from the store, validating its shape.
    pub fn from_phc(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        let phc = phc.into();
        PhcString::new(&phc).map_err(|err| PasswordHashError::Malformed {
            message: err.to_string(),
        })?;
        Ok(Self(phc))
    }

    /// Constant-time verification of a candidate password.
    pub fn verify(&self, password: &str) -> bool {
        let Ok(parsed) = PhcString::new(&self.0) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("alice", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  alice  ", "secret")]
    #[case("bob", "correct horse battery staple")]
    fn valid_credentials_trim_username(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username(), username.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    fn derive_then_verify_round_trips() {
        let hash = PasswordHash::derive("pw1").expect("hashing succeeds");
        assert!(hash.verify("pw1"));
        assert!(!hash.verify("pw2"));
    }

    #[rstest]
    fn from_phc_rejects_garbage() {
        let err = PasswordHash::from_phc("not-a-hash").expect_err("must reject");
        assert!(matches!(err, PasswordHashError::Malformed { .. }));
    }

    #[rstest]
    fn derived_hashes_are_salted() {
        let first = PasswordHash::derive("pw1").expect("hashing succeeds");
        let second = PasswordHash::derive("pw1").expect("hashing succeeds");
        assert_ne!(first.as_ref(), second.as_ref());
    }
}
