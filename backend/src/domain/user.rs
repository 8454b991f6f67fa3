//! User accounts and the clinic role model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::auth::PasswordHash;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    UsernameTooLong { max: usize },
    UsernameInvalidCharacters,
    UnknownRole { value: String },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain letters, numbers, dots, hyphens, or underscores",
            ),
            Self::UnknownRole { value } => {
                write!(f, "role must be 'owner' or 'vet', got '{value}'")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Clinic role attached to an account.
///
/// The set is closed: registration rejects any other value instead of
/// storing it verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Pet owner; may request appointments and view only their own records.
    Owner,
    /// Veterinarian; may decide appointments, record vaccinations, and run
    /// reports across all owners.
    Vet,
}

impl Role {
    /// Canonical lowercase token stored in the database and session.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Vet => "vet",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "owner" => Ok(Self::Owner),
            "vet" => Ok(Self::Vet),
            other => Err(UserValidationError::UnknownRole {
                value: other.to_owned(),
            }),
        }
    }
}

/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 100;

/// Validated account name, also used as the denormalised owner reference on
/// appointments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`], trimming surrounding
    /// whitespace.
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !trimmed
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '_'))
        {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Stored clinic account.
///
/// ## Invariants
/// - `username` is unique across the store.
/// - `password_hash` is an Argon2id PHC string, never the raw password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: i32,
    username: Username,
    password_hash: PasswordHash,
    role: Role,
}

impl User {
    /// Build a stored user from validated components.
    pub fn new(id: i32, username: Username, password_hash: PasswordHash, role: Role) -> Self {
        Self {
            id,
            username,
            password_hash,
            role,
        }
    }

    /// Stable account identifier.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Unique account name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Argon2id PHC string for credential verification.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Clinic role used for authorisation.
    pub fn role(&self) -> Role {
        self.role
    }
}

/// A registration awaiting insertion; the store assigns the identifier.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: PasswordHash,
    pub role: Role,
}
