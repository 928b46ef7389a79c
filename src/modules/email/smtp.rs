use std::fmt;

use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{SmtpTransport, Transport};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::message::OutgoingEmail;
use crate::modules::utils::logging::format_sensitive;

/// SMTP login identity
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmtpCredentials {
    // The account name used for SMTP authentication
    pub username: String,
    // The password or app-specific password for SMTP
    pub password: String,
}

impl SmtpCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Fixed relay configuration baked into the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub host: &'static str,
    pub port: u16,
    // Upgrade with STARTTLS and refuse to continue in plain text
    pub starttls_required: bool,
    // Log every negotiation step at debug level
    pub debug: bool,
    pub auth: bool,
}

pub const RELAY_SETTINGS: SessionSettings = SessionSettings {
    host: "smtp.mail.me.com",
    port: 587,
    starttls_required: true,
    debug: true,
    auth: true,
};

/// Everything needed to open an authenticated session with the relay
#[derive(Debug, Clone)]
pub struct SmtpSession {
    settings: &'static SessionSettings,
    credentials: SmtpCredentials,
}

impl SmtpSession {
    pub fn new(settings: &'static SessionSettings, credentials: SmtpCredentials) -> Self {
        Self {
            settings,
            credentials,
        }
    }

    pub fn settings(&self) -> &'static SessionSettings {
        self.settings
    }

    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    /// Build a fresh transport for one delivery
    pub fn transport(&self) -> Result<SmtpTransport, lettre::transport::smtp::Error> {
        let settings = self.settings;

        let tls = if settings.starttls_required {
            Tls::Required(TlsParameters::new(settings.host.to_string())?)
        } else {
            Tls::Opportunistic(TlsParameters::new(settings.host.to_string())?)
        };

        let mut builder = SmtpTransport::relay(settings.host)?
            .port(settings.port)
            .tls(tls);

        if settings.auth {
            builder = builder
                .credentials(Credentials::new(
                    self.credentials.username.clone(),
                    self.credentials.password.clone(),
                ))
                // LOGIN would trace bare base64 lines that cannot be redacted
                .authentication(vec![Mechanism::Plain]);
        }

        Ok(builder.build())
    }
}

/// Why a delivery attempt failed. Only ever logged.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("TLS negotiation failed: {0}")]
    Tls(String),
    #[error("could not talk to relay: {0}")]
    Connection(String),
    #[error("relay rejected the request: {0}")]
    Rejected(String),
    #[error("relay timed out: {0}")]
    Timeout(String),
}

impl From<lettre::transport::smtp::Error> for RelayError {
    fn from(e: lettre::transport::smtp::Error) -> Self {
        if e.is_timeout() {
            RelayError::Timeout(e.to_string())
        } else if e.is_tls() {
            RelayError::Tls(e.to_string())
        } else if e.is_permanent() || e.is_transient() {
            // Authentication failures arrive as 5xx replies
            RelayError::Rejected(e.to_string())
        } else {
            RelayError::Connection(e.to_string())
        }
    }
}

/// Outbound side of the gateway: hands one message to a relay
pub trait MailRelay: Send + Sync {
    fn deliver(&self, session: &SmtpSession, email: &OutgoingEmail) -> Result<(), RelayError>;
}

/// Delivers over SMTP with lettre, one connection per delivery.
///
/// lettre is built without its connection pool, so every send connects,
/// delivers and quits without leaving a reaper thread behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmtpRelay;

impl MailRelay for SmtpRelay {
    fn deliver(&self, session: &SmtpSession, email: &OutgoingEmail) -> Result<(), RelayError> {
        let settings = session.settings();
        let message = email.to_message()?;

        if settings.debug {
            debug!(
                "Opening SMTP session: host={}, port={}, starttls_required={}, auth={}, user={}",
                settings.host,
                settings.port,
                settings.starttls_required,
                settings.auth,
                format_sensitive(session.username())
            );
            debug!(
                "Negotiating: tls={}, mechanisms={}",
                if settings.starttls_required {
                    "STARTTLS required"
                } else {
                    "STARTTLS opportunistic"
                },
                if settings.auth { "PLAIN" } else { "none" }
            );
        }

        // lettre traces the EHLO/STARTTLS/AUTH exchange itself
        match session.transport().and_then(|mailer| mailer.send(&message)) {
            Ok(response) => {
                if settings.debug {
                    debug!(
                        "Relay accepted message: code={}, lines={:?}",
                        response.code(),
                        response.message().collect::<Vec<_>>()
                    );
                }
                Ok(())
            }
            Err(e) => {
                if settings.debug {
                    debug!(
                        "SMTP session failed: host={}, port={}, error={}",
                        settings.host, settings.port, e
                    );
                }
                Err(e.into())
            }
        }
    }
}
