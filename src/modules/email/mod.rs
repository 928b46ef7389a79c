pub mod gateway;
pub mod manager;
pub mod message;
pub mod smtp;
pub mod templates;

pub use gateway::{create_email_output_gateway, EmailOutputGateway};
pub use manager::{CredentialStore, CredentialStoreError};
pub use message::{EmailBodyText, EmailFrom, EmailTo, OutgoingEmail};
pub use smtp::{
    MailRelay, RelayError, SessionSettings, SmtpCredentials, SmtpRelay, SmtpSession,
    RELAY_SETTINGS,
};
pub use templates::{replace_tokens, SubjectTemplate};
