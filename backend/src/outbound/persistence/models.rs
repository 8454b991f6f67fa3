//! Diesel row structs and their conversions to domain types.
//!
//! Row structs are internal implementation details of the persistence
//! layer, never exposed to the domain. Conversions validate stored text
//! against the domain's closed sets; a row that fails validation reads as
//! a query error naming the offending id.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::{
    Appointment, PasswordHash, PetName, QueuedNotification, Role, User, Username,
    VaccinationRecord,
};

use super::schema::{appointments, email_outbox, users, vaccinations};

#[derive(Debug, Queryable)]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

impl UserRow {
    pub(crate) fn into_domain(self) -> Result<User, String> {
        let username = Username::new(&self.username)
            .map_err(|err| format!("corrupt user row {}: {err}", self.id))?;
        let password_hash = PasswordHash::from_phc(self.password_hash)
            .map_err(|err| format!("corrupt user row {}: {err}", self.id))?;
        let role = self
            .role
            .parse::<Role>()
            .map_err(|err| format!("corrupt user row {}: {err}", self.id))?;
        Ok(User::new(self.id, username, password_hash, role))
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow {
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(Debug, Queryable)]
pub(crate) struct AppointmentRow {
    pub id: i32,
    pub pet_name: String,
    pub owner_username: String,
    pub date: NaiveDate,
    pub reason: String,
    pub status: String,
}

impl AppointmentRow {
    pub(crate) fn into_domain(self) -> Result<Appointment, String> {
        let pet_name = PetName::new(&self.pet_name)
            .map_err(|err| format!("corrupt appointment row {}: {err}", self.id))?;
        let owner = Username::new(&self.owner_username)
            .map_err(|err| format!("corrupt appointment row {}: {err}", self.id))?;
        let status = self
            .status
            .parse()
            .map_err(|err| format!("corrupt appointment row {}: {err}", self.id))?;
        Ok(Appointment::new(
            self.id,
            pet_name,
            owner,
            self.date,
            self.reason,
            status,
        ))
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = appointments)]
pub(crate) struct NewAppointmentRow {
    pub pet_name: String,
    pub owner_username: String,
    pub date: NaiveDate,
    pub reason: String,
    pub status: String,
}

#[derive(Debug, Queryable)]
pub(crate) struct VaccinationRow {
    pub id: i32,
    pub pet_name: String,
    pub vaccine: String,
    pub given_date: NaiveDate,
    pub next_due: NaiveDate,
}

impl VaccinationRow {
    pub(crate) fn into_domain(self) -> Result<VaccinationRecord, String> {
        let pet_name = PetName::new(&self.pet_name)
            .map_err(|err| format!("corrupt vaccination row {}: {err}", self.id))?;
        Ok(VaccinationRecord::new(
            self.id,
            pet_name,
            self.vaccine,
            self.given_date,
            self.next_due,
        ))
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = vaccinations)]
pub(crate) struct NewVaccinationRow {
    pub pet_name: String,
    pub vaccine: String,
    pub given_date: NaiveDate,
    pub next_due: NaiveDate,
}

/// Queued entry, loaded via an explicit select of the delivery-relevant
/// columns.
#[derive(Debug, Queryable)]
pub(crate) struct OutboxRow {
    pub id: i32,
    pub subject: String,
    pub body: String,
    pub attempts: i32,
}

impl OutboxRow {
    pub(crate) fn into_domain(self) -> QueuedNotification {
        QueuedNotification::new(self.id, self.subject, self.body, self.attempts)
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = email_outbox)]
pub(crate) struct NewOutboxRow {
    pub subject: String,
    pub body: String,
    pub created_at: NaiveDateTime,
}
