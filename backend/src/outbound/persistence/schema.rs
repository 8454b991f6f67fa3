//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation.

diesel::table! {
    /// Clinic accounts.
    users (id) {
        id -> Integer,
        /// Unique account name.
        username -> Text,
        /// Argon2id PHC string.
        password_hash -> Text,
        /// Closed-set role token: `owner` or `vet`.
        role -> Text,
    }
}

diesel::table! {
    /// Appointment requests and their lifecycle status.
    appointments (id) {
        id -> Integer,
        pet_name -> Text,
        /// Denormalised owner username; no foreign key.
        owner_username -> Text,
        date -> Date,
        reason -> Text,
        /// Closed-set status token, defaults to `Pending`.
        status -> Text,
    }
}

diesel::table! {
    /// Append-only vaccination ledger.
    vaccinations (id) {
        id -> Integer,
        pet_name -> Text,
        vaccine -> Text,
        given_date -> Date,
        next_due -> Date,
    }
}

diesel::table! {
    /// Durable notification outbox drained by the mailer worker.
    email_outbox (id) {
        id -> Integer,
        subject -> Text,
        body -> Text,
        created_at -> Timestamp,
        attempts -> Integer,
        /// NULL until the transport accepted the message.
        sent_at -> Nullable<Timestamp>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, appointments, vaccinations, email_outbox);
