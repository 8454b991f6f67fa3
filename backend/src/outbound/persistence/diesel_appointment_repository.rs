//! Diesel-backed adapter for the [`AppointmentRepository`] port.

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;

use crate::domain::ports::{AppointmentPersistenceError, AppointmentRepository};
use crate::domain::{Appointment, AppointmentStatus, NewAppointment, StatusCounts, Username};

use super::models::{AppointmentRow, NewAppointmentRow};
use super::pool::DbPool;
use super::schema::appointments;

/// SQLite-backed appointment store.
#[derive(Clone)]
pub struct DieselAppointmentRepository {
    pool: DbPool,
}

impl DieselAppointmentRepository {
    /// Create an adapter over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn load_by_id(
    conn: &mut SqliteConnection,
    id: i32,
) -> Result<Option<Appointment>, AppointmentPersistenceError> {
    let row: Option<AppointmentRow> = appointments::table
        .find(id)
        .first(conn)
        .optional()
        .map_err(|err| AppointmentPersistenceError::query(err.to_string()))?;
    row.map(AppointmentRow::into_domain)
        .transpose()
        .map_err(AppointmentPersistenceError::query)
}

#[async_trait]
impl AppointmentRepository for DieselAppointmentRepository {
    async fn insert(
        &self,
        appointment: NewAppointment,
    ) -> Result<Appointment, AppointmentPersistenceError> {
        let pool = self.pool.clone();
        let row = NewAppointmentRow {
            pet_name: String::from(appointment.pet_name),
            owner_username: String::from(appointment.owner),
            date: appointment.date,
            reason: appointment.reason,
            status: AppointmentStatus::Pending.as_str().to_owned(),
        };
        super::run_blocking(
            move || {
                let mut conn = pool
                    .get()
                    .map_err(|err| AppointmentPersistenceError::connection(err.to_string()))?;
                let stored: AppointmentRow = diesel::insert_into(appointments::table)
                    .values(&row)
                    .get_result(&mut conn)
                    .map_err(|err| AppointmentPersistenceError::query(err.to_string()))?;
                stored
                    .into_domain()
                    .map_err(AppointmentPersistenceError::query)
            },
            AppointmentPersistenceError::query,
        )
        .await
    }

    async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<Appointment>, AppointmentPersistenceError> {
        let pool = self.pool.clone();
        super::run_blocking(
            move || {
                let mut conn = pool
                    .get()
                    .map_err(|err| AppointmentPersistenceError::connection(err.to_string()))?;
                load_by_id(&mut conn, id)
            },
            AppointmentPersistenceError::query,
        )
        .await
    }

    async fn update_status(
        &self,
        id: i32,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, AppointmentPersistenceError> {
        let pool = self.pool.clone();
        super::run_blocking(
            move || {
                let mut conn = pool
                    .get()
                    .map_err(|err| AppointmentPersistenceError::connection(err.to_string()))?;
                let updated = diesel::update(appointments::table.find(id))
                    .set(appointments::status.eq(status.as_str()))
                    .execute(&mut conn)
                    .map_err(|err| AppointmentPersistenceError::query(err.to_string()))?;
                if updated == 0 {
                    return Ok(None);
                }
                load_by_id(&mut conn, id)
            },
            AppointmentPersistenceError::query,
        )
        .await
    }

    async fn list_for_owner(
        &self,
        owner: &Username,
    ) -> Result<Vec<Appointment>, AppointmentPersistenceError> {
        let pool = self.pool.clone();
        let owner = owner.as_ref().to_owned();
        super::run_blocking(
            move || {
                let mut conn = pool
                    .get()
                    .map_err(|err| AppointmentPersistenceError::connection(err.to_string()))?;
                let rows: Vec<AppointmentRow> = appointments::table
                    .filter(appointments::owner_username.eq(&owner))
                    .order(appointments::id.asc())
                    .load(&mut conn)
                    .map_err(|err| AppointmentPersistenceError::query(err.to_string()))?;
                rows.into_iter()
                    .map(|row| row.into_domain().map_err(AppointmentPersistenceError::query))
                    .collect()
            },
            AppointmentPersistenceError::query,
        )
        .await
    }

    async fn list_all(&self) -> Result<Vec<Appointment>, AppointmentPersistenceError> {
        let pool = self.pool.clone();
        super::run_blocking(
            move || {
                let mut conn = pool
                    .get()
                    .map_err(|err| AppointmentPersistenceError::connection(err.to_string()))?;
                let rows: Vec<AppointmentRow> = appointments::table
                    .order(appointments::id.asc())
                    .load(&mut conn)
                    .map_err(|err| AppointmentPersistenceError::query(err.to_string()))?;
                rows.into_iter()
                    .map(|row| row.into_domain().map_err(AppointmentPersistenceError::query))
                    .collect()
            },
            AppointmentPersistenceError::query,
        )
        .await
    }

    async fn status_counts(&self) -> Result<StatusCounts, AppointmentPersistenceError> {
        let pool = self.pool.clone();
        super::run_blocking(
            move || {
                let mut conn = pool
                    .get()
                    .map_err(|err| AppointmentPersistenceError::connection(err.to_string()))?;
                let grouped: Vec<(String, i64)> = appointments::table
                    .group_by(appointments::status)
                    .select((appointments::status, count_star()))
                    .load(&mut conn)
                    .map_err(|err| AppointmentPersistenceError::query(err.to_string()))?;

                let mut counts = StatusCounts::default();
                for (token, total) in grouped {
                    let status: AppointmentStatus = token
                        .parse()
                        .map_err(|err| AppointmentPersistenceError::query(format!("{err}")))?;
                    match status {
                        AppointmentStatus::Pending => counts.pending = total,
                        AppointmentStatus::Approved => counts.approved = total,
                        AppointmentStatus::Rejected => counts.rejected = total,
                    }
                }
                Ok(counts)
            },
            AppointmentPersistenceError::query,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::PetName;
    use crate::outbound::persistence::{run_pending_migrations, PoolConfig};
    use chrono::NaiveDate;
    use rstest::rstest;

    fn repository() -> DieselAppointmentRepository {
        let pool = DbPool::new(PoolConfig::new(":memory:").with_max_size(1))
            .expect("pool builds against memory database");
        run_pending_migrations(&pool).expect("migrations apply");
        DieselAppointmentRepository::new(pool)
    }

    fn request(pet: &str, owner: &str, date: &str) -> NewAppointment {
        NewAppointment {
            pet_name: PetName::new(pet).expect("valid pet name"),
            owner: Username::new(owner).expect("valid username"),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid date"),
            reason: "checkup".to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn new_appointments_start_pending() {
        let repo = repository();

        let stored = repo
            .insert(request("Rex", "alice", "2024-01-01"))
            .await
            .expect("insert succeeds");
        assert_eq!(stored.status(), AppointmentStatus::Pending);

        let found = repo
            .find_by_id(stored.id())
            .await
            .expect("lookup succeeds")
            .expect("appointment exists");
        assert_eq!(found.status(), AppointmentStatus::Pending);
    }

    #[rstest]
    #[tokio::test]
    async fn update_status_overwrites_unconditionally() {
        let repo = repository();
        let stored = repo
            .insert(request("Rex", "alice", "2024-01-01"))
            .await
            .expect("insert succeeds");

        let approved = repo
            .update_status(stored.id(), AppointmentStatus::Approved)
            .await
            .expect("update succeeds")
            .expect("appointment exists");
        assert_eq!(approved.status(), AppointmentStatus::Approved);

        // Decisions may be revised; Approved -> Rejected is permitted.
        let rejected = repo
            .update_status(stored.id(), AppointmentStatus::Rejected)
            .await
            .expect("update succeeds")
            .expect("appointment exists");
        assert_eq!(rejected.status(), AppointmentStatus::Rejected);
    }

    #[rstest]
    #[tokio::test]
    async fn update_status_of_missing_appointment_is_none() {
        let repo = repository();

        let result = repo
            .update_status(9999, AppointmentStatus::Approved)
            .await
            .expect("update succeeds");
        assert!(result.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn list_for_owner_filters_by_owner() {
        let repo = repository();
        repo.insert(request("Rex", "alice", "2024-01-01"))
            .await
            .expect("insert succeeds");
        repo.insert(request("Milo", "bob", "2024-01-02"))
            .await
            .expect("insert succeeds");
        repo.insert(request("Luna", "alice", "2024-01-03"))
            .await
            .expect("insert succeeds");

        let alice = Username::new("alice").expect("valid username");
        let mine = repo.list_for_owner(&alice).await.expect("list succeeds");
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|appt| appt.owner() == &alice));

        let all = repo.list_all().await.expect("list succeeds");
        assert_eq!(all.len(), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn status_counts_total_the_whole_table() {
        let repo = repository();
        let first = repo
            .insert(request("Rex", "alice", "2024-01-01"))
            .await
            .expect("insert succeeds");
        repo.insert(request("Milo", "bob", "2024-01-02"))
            .await
            .expect("insert succeeds");
        repo.update_status(first.id(), AppointmentStatus::Approved)
            .await
            .expect("update succeeds");

        let counts = repo.status_counts().await.expect("counts load");
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.approved, 1);
        assert_eq!(counts.rejected, 0);
    }
}
