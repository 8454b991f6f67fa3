//! Port abstraction for vaccination ledger adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewVaccination, PetName, VaccinationRecord};

/// Persistence errors raised by vaccination ledger adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VaccinationPersistenceError {
    /// Repository connection could not be established.
    #[error("vaccination ledger connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("vaccination ledger query failed: {message}")]
    Query { message: String },
}

impl VaccinationPersistenceError {
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
}

/// Access to the append-only vaccination ledger.
#[async_trait]
pub trait VaccinationRepository: Send + Sync {
    /// Append a ledger entry, returning the stored row.
    async fn insert(
        &self,
        record: NewVaccination,
    ) -> Result<VaccinationRecord, VaccinationPersistenceError>;

    /// The whole ledger in insertion order.
    async fn list_all(&self) -> Result<Vec<VaccinationRecord>, VaccinationPersistenceError>;

    /// Ledger entries matching a pet name exactly, in insertion order.
    async fn list_for_pet(
        &self,
        pet: &PetName,
    ) -> Result<Vec<VaccinationRecord>, VaccinationPersistenceError>;
}
