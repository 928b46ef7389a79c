mod noop;

use std::fmt;

use thiserror::Error;

pub use noop::LogOutputGateway;

/// The kind of collection a notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ServiceType {
    Refuse,
    Recycling,
}

impl ServiceType {
    /// Capitalised word used when rendering subjects
    pub fn as_word(&self) -> &'static str {
        match self {
            ServiceType::Refuse => "Refuse",
            ServiceType::Recycling => "Recycling",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_word())
    }
}

impl std::str::FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "refuse" => Ok(ServiceType::Refuse),
            "recycling" => Ok(ServiceType::Recycling),
            other => Err(format!("Unknown service type: {}", other)),
        }
    }
}

/// Details of an upcoming collection, supplied per `notify` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceEvent {
    pub service_type: ServiceType,
}

impl ServiceEvent {
    pub fn new(service_type: ServiceType) -> Self {
        Self { service_type }
    }
}

/// The notification attempt failed. Carries no further detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("notification could not be sent")]
pub struct NotifyError;

/// Something that can tell a user about an upcoming collection
pub trait UpcomingOutputGateway: Send + Sync {
    fn notify(&self, event: &ServiceEvent) -> Result<(), NotifyError>;
}
