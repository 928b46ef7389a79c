use log::info;

use super::{NotifyError, ServiceEvent, UpcomingOutputGateway};

/// Gateway that only logs the event and never sends anything
#[derive(Debug, Clone, Default)]
pub struct LogOutputGateway;

impl UpcomingOutputGateway for LogOutputGateway {
    fn notify(&self, event: &ServiceEvent) -> Result<(), NotifyError> {
        info!(
            "Dry run: skipping notification for service={}",
            event.service_type
        );
        Ok(())
    }
}
