//! Outbound email notifications.
//!
//! Handlers build a [`Notification`] and enqueue it; the mailer worker
//! drains the queue and delivers each entry at least once. Delivery failure
//! never affects the state change that produced the notification.

use super::appointment::Appointment;

/// A notification ready to be queued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    subject: String,
    body: String,
}

impl Notification {
    /// Build a notification from raw parts.
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Announcement for a freshly created appointment request.
    pub fn appointment_requested(appointment: &Appointment) -> Self {
        Self::new(
            "New Appointment Request",
            format!(
                "New appointment request for {} on {}",
                appointment.pet_name(),
                appointment.date()
            ),
        )
    }

    /// Announcement for a status decision on an appointment.
    pub fn status_changed(appointment: &Appointment) -> Self {
        Self::new(
            "Appointment Status Updated",
            format!(
                "Appointment for {} is {}",
                appointment.pet_name(),
                appointment.status()
            ),
        )
    }

    /// Subject line of the email.
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Plain-text body of the email.
    pub fn body(&self) -> &str {
        self.body.as_str()
    }
}

/// A queued notification as read back from the outbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedNotification {
    id: i32,
    subject: String,
    body: String,
    attempts: i32,
}

impl QueuedNotification {
    /// Build a queued entry from stored components.
    pub fn new(id: i32, subject: String, body: String, attempts: i32) -> Self {
        Self {
            id,
            subject,
            body,
            attempts,
        }
    }

    /// Stable outbox identifier.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Subject line of the email.
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Plain-text body of the email.
    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    /// Number of delivery attempts made so far.
    pub fn attempts(&self) -> i32 {
        self.attempts
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{AppointmentStatus, PetName, Username};
    use chrono::NaiveDate;
    use rstest::rstest;

    fn appointment(status: AppointmentStatus) -> Appointment {
        Appointment::new(
            1,
            PetName::new("Rex").expect("valid pet name"),
            Username::new("alice").expect("valid username"),
            NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            "checkup".to_owned(),
            status,
        )
    }

    #[rstest]
    fn request_notification_names_the_pet_and_date() {
        let note = Notification::appointment_requested(&appointment(AppointmentStatus::Pending));
        assert_eq!(note.subject(), "New Appointment Request");
        assert_eq!(note.body(), "New appointment request for Rex on 2024-01-01");
    }

    #[rstest]
    #[case(AppointmentStatus::Approved, "Appointment for Rex is Approved")]
    #[case(AppointmentStatus::Rejected, "Appointment for Rex is Rejected")]
    fn status_notification_names_the_new_status(
        #[case] status: AppointmentStatus,
        #[case] expected: &str,
    ) {
        let note = Notification::status_changed(&appointment(status));
        assert_eq!(note.subject(), "Appointment Status Updated");
        assert_eq!(note.body(), expected);
    }
}
