use std::fmt;
use std::fs;
use std::path::Path;

use lettre::address::AddressError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::modules::email::{
    create_email_output_gateway, EmailBodyText, EmailFrom, EmailOutputGateway, EmailTo,
    SmtpCredentials, SubjectTemplate,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid {field} address: {source}")]
    InvalidAddress {
        field: &'static str,
        #[source]
        source: AddressError,
    },
    #[error("no SMTP password configured")]
    MissingPassword,
}

/// Gateway configuration as read from a JSON settings file
#[derive(Clone, Serialize, Deserialize)]
pub struct GatewaySettings {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub from: String,
    pub to: String,
    pub body_text: String,
    pub subject_template: String,
}

impl fmt::Debug for GatewaySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewaySettings")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("from", &self.from)
            .field("to", &self.to)
            .field("body_text", &self.body_text)
            .field("subject_template", &self.subject_template)
            .finish()
    }
}

impl GatewaySettings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Parse the sender and recipient addresses
    pub fn addresses(&self) -> Result<(EmailFrom, EmailTo), ConfigError> {
        let email_from: EmailFrom = self
            .from
            .parse()
            .map_err(|source| ConfigError::InvalidAddress {
                field: "from",
                source,
            })?;
        let email_to: EmailTo = self
            .to
            .parse()
            .map_err(|source| ConfigError::InvalidAddress { field: "to", source })?;
        Ok((email_from, email_to))
    }

    /// Parse addresses and build the gateway.
    ///
    /// A password in the file wins over `fallback_password`.
    pub fn build_gateway(
        self,
        fallback_password: Option<String>,
    ) -> Result<EmailOutputGateway, ConfigError> {
        let (email_from, email_to) = self.addresses()?;

        let password = self
            .password
            .or(fallback_password)
            .ok_or(ConfigError::MissingPassword)?;

        Ok(create_email_output_gateway(
            SmtpCredentials::new(self.username, password),
            email_from,
            email_to,
            EmailBodyText::new(self.body_text),
            SubjectTemplate::new(self.subject_template),
        ))
    }
}
