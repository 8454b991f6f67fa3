//! Environment-driven application configuration.
//!
//! All settings come from the process environment with workable defaults
//! for local development. The session key is the one secret: it is read
//! from a file named by `SESSION_KEY_FILE`, and only debug builds (or an
//! explicit `SESSION_ALLOW_EPHEMERAL=1`) may fall back to a generated
//! throwaway key.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::Key;
use tracing::warn;

use crate::outbound::mailer::SmtpSettings;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATABASE_URL: &str = "vetclinic.db";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_OUTBOX_POLL_SECS: u64 = 30;

/// Minimum length accepted for session key material.
const SESSION_KEY_MIN_BYTES: usize = 32;

/// Errors raised while assembling configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `BIND_ADDR` did not parse as a socket address.
    #[error("invalid BIND_ADDR '{value}': {message}")]
    InvalidBindAddr { value: String, message: String },
    /// The session key file could not be read and no fallback applies.
    #[error("failed to read session key at {path}: {message}")]
    SessionKeyUnreadable { path: String, message: String },
    /// The session key file holds too little material.
    #[error("session key at {path} is shorter than {SESSION_KEY_MIN_BYTES} bytes")]
    SessionKeyTooShort { path: String },
    /// `SMTP_HOST` is set but a companion variable is missing.
    #[error("SMTP_HOST is set but {name} is missing")]
    IncompleteSmtp { name: &'static str },
    /// A numeric variable did not parse.
    #[error("invalid {name} '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

/// Resolved application settings.
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub session_key: Key,
    pub cookie_secure: bool,
    /// SMTP relay settings; `None` selects the logging transport.
    pub smtp: Option<SmtpSettings>,
    pub outbox_poll: Duration,
}

impl AppConfig {
    /// Assemble configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_value = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr: SocketAddr =
            bind_value
                .parse()
                .map_err(|err: std::net::AddrParseError| ConfigError::InvalidBindAddr {
                    value: bind_value.clone(),
                    message: err.to_string(),
                })?;

        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());

        let key_path =
            lookup("SESSION_KEY_FILE").unwrap_or_else(|| DEFAULT_SESSION_KEY_FILE.to_owned());
        let allow_ephemeral = lookup("SESSION_ALLOW_EPHEMERAL").as_deref() == Some("1");
        let session_key = load_session_key(&key_path, allow_ephemeral)?;

        let cookie_secure = lookup("SESSION_COOKIE_SECURE")
            .map(|value| value != "0")
            .unwrap_or(true);

        let smtp = smtp_from_lookup(&lookup)?;

        let outbox_poll = match lookup("OUTBOX_POLL_SECS") {
            Some(value) => {
                let secs: u64 = value.parse().map_err(|_| ConfigError::InvalidNumber {
                    name: "OUTBOX_POLL_SECS",
                    value,
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_OUTBOX_POLL_SECS),
        };

        Ok(Self {
            bind_addr,
            database_url,
            session_key,
            cookie_secure,
            smtp,
            outbox_poll,
        })
    }
}

fn load_session_key(path: &str, allow_ephemeral: bool) -> Result<Key, ConfigError> {
    match std::fs::read(path) {
        Ok(bytes) if bytes.len() >= SESSION_KEY_MIN_BYTES => Ok(Key::derive_from(&bytes)),
        Ok(_) => Err(ConfigError::SessionKeyTooShort {
            path: path.to_owned(),
        }),
        Err(err) => {
            if cfg!(debug_assertions) || allow_ephemeral {
                warn!(path, error = %err, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(ConfigError::SessionKeyUnreadable {
                    path: path.to_owned(),
                    message: err.to_string(),
                })
            }
        }
    }
}

fn smtp_from_lookup(
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<Option<SmtpSettings>, ConfigError> {
    let Some(host) = lookup("SMTP_HOST") else {
        return Ok(None);
    };
    let require = |name: &'static str| -> Result<String, ConfigError> {
        lookup(name).ok_or(ConfigError::IncompleteSmtp { name })
    };
    let port = match lookup("SMTP_PORT") {
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidNumber {
            name: "SMTP_PORT",
            value,
        })?,
        None => DEFAULT_SMTP_PORT,
    };
    Ok(Some(SmtpSettings {
        host,
        port,
        username: require("SMTP_USERNAME")?,
        password: require("SMTP_PASSWORD")?,
        sender: require("MAIL_FROM")?,
        recipient: require("MAIL_TO")?,
    }))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;
    use std::io::Write;

    fn key_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file creates");
        file.write_all(&[7u8; 64]).expect("key material writes");
        file
    }

    fn config_from(vars: HashMap<&'static str, String>) -> Result<AppConfig, ConfigError> {
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[rstest]
    fn defaults_apply_when_environment_is_empty() {
        let file = key_file();
        let vars = HashMap::from([("SESSION_KEY_FILE", file.path().display().to_string())]);

        let config = config_from(vars).expect("defaults are valid");
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.database_url, "vetclinic.db");
        assert!(config.cookie_secure);
        assert!(config.smtp.is_none());
        assert_eq!(config.outbox_poll, Duration::from_secs(30));
    }

    #[rstest]
    fn invalid_bind_addr_is_rejected() {
        let file = key_file();
        let vars = HashMap::from([
            ("SESSION_KEY_FILE", file.path().display().to_string()),
            ("BIND_ADDR", "not-an-address".to_owned()),
        ]);

        let err = config_from(vars).err().expect("bad address must fail");
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    }

    #[rstest]
    fn short_session_key_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file creates");
        file.write_all(&[7u8; 8]).expect("key material writes");
        let vars = HashMap::from([("SESSION_KEY_FILE", file.path().display().to_string())]);

        let err = config_from(vars).err().expect("short key must fail");
        assert!(matches!(err, ConfigError::SessionKeyTooShort { .. }));
    }

    #[rstest]
    fn smtp_group_requires_companion_variables() {
        let file = key_file();
        let vars = HashMap::from([
            ("SESSION_KEY_FILE", file.path().display().to_string()),
            ("SMTP_HOST", "smtp.example.com".to_owned()),
        ]);

        let err = config_from(vars).err().expect("partial SMTP settings must fail");
        assert!(matches!(
            err,
            ConfigError::IncompleteSmtp {
                name: "SMTP_USERNAME"
            }
        ));
    }

    #[rstest]
    fn complete_smtp_group_is_accepted() {
        let file = key_file();
        let vars = HashMap::from([
            ("SESSION_KEY_FILE", file.path().display().to_string()),
            ("SMTP_HOST", "smtp.example.com".to_owned()),
            ("SMTP_PORT", "2525".to_owned()),
            ("SMTP_USERNAME", "clinic".to_owned()),
            ("SMTP_PASSWORD", "secret".to_owned()),
            ("MAIL_FROM", "clinic@example.com".to_owned()),
            ("MAIL_TO", "vet@example.com".to_owned()),
        ]);

        let config = config_from(vars).expect("complete settings are valid");
        let smtp = config.smtp.expect("smtp configured");
        assert_eq!(smtp.host, "smtp.example.com");
        assert_eq!(smtp.port, 2525);
    }
}
