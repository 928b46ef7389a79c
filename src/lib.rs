// First, declare the modules folder itself
mod modules;

// Re-export everything from modules for easier access
pub use modules::{config, email, notify, utils};

// Re-export commonly used types
pub use modules::config::{ConfigError, GatewaySettings};
pub use modules::email::gateway::{create_email_output_gateway, EmailOutputGateway};
pub use modules::notify::{
    LogOutputGateway, NotifyError, ServiceEvent, ServiceType, UpcomingOutputGateway,
};
