//! Diesel-backed adapter for the [`VaccinationRepository`] port.

use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::ports::{VaccinationPersistenceError, VaccinationRepository};
use crate::domain::{NewVaccination, PetName, VaccinationRecord};

use super::models::{NewVaccinationRow, VaccinationRow};
use super::pool::DbPool;
use super::schema::vaccinations;

/// SQLite-backed vaccination ledger.
#[derive(Clone)]
pub struct DieselVaccinationRepository {
    pool: DbPool,
}

impl DieselVaccinationRepository {
    /// Create an adapter over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VaccinationRepository for DieselVaccinationRepository {
    async fn insert(
        &self,
        record: NewVaccination,
    ) -> Result<VaccinationRecord, VaccinationPersistenceError> {
        let pool = self.pool.clone();
        let row = NewVaccinationRow {
            pet_name: String::from(record.pet_name),
            vaccine: record.vaccine,
            given_date: record.given_date,
            next_due: record.next_due,
        };
        super::run_blocking(
            move || {
                let mut conn = pool
                    .get()
                    .map_err(|err| VaccinationPersistenceError::connection(err.to_string()))?;
                let stored: VaccinationRow = diesel::insert_into(vaccinations::table)
                    .values(&row)
                    .get_result(&mut conn)
                    .map_err(|err| VaccinationPersistenceError::query(err.to_string()))?;
                stored
                    .into_domain()
                    .map_err(VaccinationPersistenceError::query)
            },
            VaccinationPersistenceError::query,
        )
        .await
    }

    async fn list_all(&self) -> Result<Vec<VaccinationRecord>, VaccinationPersistenceError> {
        let pool = self.pool.clone();
        super::run_blocking(
            move || {
                let mut conn = pool
                    .get()
                    .map_err(|err| VaccinationPersistenceError::connection(err.to_string()))?;
                let rows: Vec<VaccinationRow> = vaccinations::table
                    .order(vaccinations::id.asc())
                    .load(&mut conn)
                    .map_err(|err| VaccinationPersistenceError::query(err.to_string()))?;
                rows.into_iter()
                    .map(|row| row.into_domain().map_err(VaccinationPersistenceError::query))
                    .collect()
            },
            VaccinationPersistenceError::query,
        )
        .await
    }

    async fn list_for_pet(
        &self,
        pet: &PetName,
    ) -> Result<Vec<VaccinationRecord>, VaccinationPersistenceError> {
        let pool = self.pool.clone();
        let pet = pet.as_ref().to_owned();
        super::run_blocking(
            move || {
                let mut conn = pool
                    .get()
                    .map_err(|err| VaccinationPersistenceError::connection(err.to_string()))?;
                let rows: Vec<VaccinationRow> = vaccinations::table
                    .filter(vaccinations::pet_name.eq(&pet))
                    .order(vaccinations::id.asc())
                    .load(&mut conn)
                    .map_err(|err| VaccinationPersistenceError::query(err.to_string()))?;
                rows.into_iter()
                    .map(|row| row.into_domain().map_err(VaccinationPersistenceError::query))
                    .collect()
            },
            VaccinationPersistenceError::query,
        )
        .await
    }
}
