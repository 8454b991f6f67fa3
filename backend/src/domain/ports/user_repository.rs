//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewUser, User, Username};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
    /// The username is already taken.
    #[error("username '{username}' is already registered")]
    Duplicate { username: String },
}

impl UserPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a duplicate-username error.
    pub fn duplicate(username: impl Into<String>) -> Self {
        Self::Duplicate {
            username: username.into(),
        }
    }
}

/// Access to stored clinic accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account, returning the stored row.
    ///
    /// Must fail with [`UserPersistenceError::Duplicate`] when the username
    /// is already registered, whether detected by pre-check or by the
    /// storage uniqueness constraint.
    async fn insert(&self, user: NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch an account by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;
}
