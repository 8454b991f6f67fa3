//! SMTP and logging implementations of the [`MailTransport`] port.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::ports::{MailTransport, MailTransportError};
use crate::domain::QueuedNotification;

/// Connection settings for the SMTP relay.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Address the clinic sends from.
    pub sender: String,
    /// Address notifications are delivered to.
    pub recipient: String,
}

/// Relay-backed transport using STARTTLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    recipient: Mailbox,
}

impl SmtpMailer {
    /// Build a transport from relay settings.
    ///
    /// # Errors
    ///
    /// Returns [`MailTransportError::Message`] when an address does not
    /// parse or the relay host is invalid.
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailTransportError> {
        let sender: Mailbox = settings
            .sender
            .parse()
            .map_err(|err| MailTransportError::message(format!("sender address: {err}")))?;
        let recipient: Mailbox = settings
            .recipient
            .parse()
            .map_err(|err| MailTransportError::message(format!("recipient address: {err}")))?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .map_err(|err| MailTransportError::message(err.to_string()))?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();
        Ok(Self {
            transport,
            sender,
            recipient,
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn deliver(&self, notification: &QueuedNotification) -> Result<(), MailTransportError> {
        let message = Message::builder()
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .subject(notification.subject())
            .body(notification.body().to_owned())
            .map_err(|err| MailTransportError::message(err.to_string()))?;
        self.transport
            .send(message)
            .await
            .map_err(|err| MailTransportError::delivery(err.to_string()))?;
        Ok(())
    }
}

/// Fallback transport that writes deliveries to the log stream.
///
/// Used when no SMTP relay is configured, so local and test deployments
/// still exercise the full outbox path.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl MailTransport for LogMailer {
    async fn deliver(&self, notification: &QueuedNotification) -> Result<(), MailTransportError> {
        tracing::info!(
            subject = notification.subject(),
            body = notification.body(),
            "email delivery (no SMTP relay configured)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn settings() -> SmtpSettings {
        SmtpSettings {
            host: "smtp.example.com".to_owned(),
            port: 587,
            username: "clinic".to_owned(),
            password: "secret".to_owned(),
            sender: "clinic@example.com".to_owned(),
            recipient: "vet@example.com".to_owned(),
        }
    }

    #[rstest]
    fn mailer_builds_from_valid_settings() {
        SmtpMailer::new(&settings()).expect("valid settings build a mailer");
    }

    #[rstest]
    #[case("not-an-address")]
    #[case("")]
    fn invalid_sender_address_is_rejected(#[case] sender: &str) {
        let mut settings = settings();
        settings.sender = sender.to_owned();
        let Err(err) = SmtpMailer::new(&settings) else {
            panic!("bad address must fail");
        };
        assert!(matches!(err, MailTransportError::Message { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn log_mailer_always_accepts() {
        let entry = QueuedNotification::new(1, "subject".to_owned(), "body".to_owned(), 0);
        LogMailer.deliver(&entry).await.expect("logging never fails");
    }
}
