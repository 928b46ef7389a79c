use std::time::{SystemTime, UNIX_EPOCH};

use keyring::Entry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::smtp::SmtpCredentials;

const SERVICE_NAME: &str = "collection-notifier";
const ENTRY_NAME: &str = "smtp-credentials";

#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),
    #[error("stored credentials are unreadable: {0}")]
    Format(#[from] serde_json::Error),
}

/// Credentials as kept in the keyring
#[derive(Serialize, Deserialize)]
struct StoredCredentials {
    #[serde(flatten)]
    credentials: SmtpCredentials,
    // When these credentials were last updated
    last_updated: u64,
}

/// SMTP credentials kept in the system keyring
pub struct CredentialStore {
    keyring: Entry,
}

impl CredentialStore {
    pub fn new() -> Result<Self, CredentialStoreError> {
        Ok(Self {
            keyring: Entry::new(SERVICE_NAME, ENTRY_NAME)?,
        })
    }

    pub fn store_credentials(
        &self,
        credentials: &SmtpCredentials,
    ) -> Result<(), CredentialStoreError> {
        let stored = StoredCredentials {
            credentials: credentials.clone(),
            last_updated: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
        };

        let creds_json = serde_json::to_string(&stored)?;
        self.keyring.set_password(&creds_json)?;
        Ok(())
    }

    pub fn get_credentials(&self) -> Result<SmtpCredentials, CredentialStoreError> {
        let creds_json = self.keyring.get_password()?;
        decode_credentials(&creds_json)
    }

    pub fn delete_credentials(&self) -> Result<(), CredentialStoreError> {
        self.keyring.delete_password()?;
        Ok(())
    }
}

fn decode_credentials(creds_json: &str) -> Result<SmtpCredentials, CredentialStoreError> {
    let stored: StoredCredentials = serde_json::from_str(creds_json)?;
    Ok(stored.credentials)
}
