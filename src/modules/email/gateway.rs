use log::{info, warn};

use super::message::{EmailBodyText, EmailFrom, EmailTo, OutgoingEmail};
use super::smtp::{
    MailRelay, SessionSettings, SmtpCredentials, SmtpRelay, SmtpSession, RELAY_SETTINGS,
};
use super::templates::SubjectTemplate;
use crate::modules::notify::{NotifyError, ServiceEvent, UpcomingOutputGateway};
use crate::modules::utils::logging::log_notify_event;

/// Sends collection reminders by email through a fixed SMTP relay
pub struct EmailOutputGateway<R = SmtpRelay> {
    relay: R,
    session: SmtpSession,
    email_from: EmailFrom,
    email_to: EmailTo,
    email_body_text: EmailBodyText,
    subject_template: SubjectTemplate,
}

/// Construct a gateway that sends through the built-in relay.
///
/// The subject template may contain `<<serviceType>>`, which is replaced with
/// `Refuse` or `Recycling` depending on the event.
pub fn create_email_output_gateway(
    credentials: SmtpCredentials,
    email_from: EmailFrom,
    email_to: EmailTo,
    email_body_text: EmailBodyText,
    subject_template: SubjectTemplate,
) -> EmailOutputGateway<SmtpRelay> {
    EmailOutputGateway::with_relay(
        SmtpRelay,
        &RELAY_SETTINGS,
        credentials,
        email_from,
        email_to,
        email_body_text,
        subject_template,
    )
}

impl<R: MailRelay> EmailOutputGateway<R> {
    pub fn with_relay(
        relay: R,
        settings: &'static SessionSettings,
        credentials: SmtpCredentials,
        email_from: EmailFrom,
        email_to: EmailTo,
        email_body_text: EmailBodyText,
        subject_template: SubjectTemplate,
    ) -> Self {
        Self {
            relay,
            session: SmtpSession::new(settings, credentials),
            email_from,
            email_to,
            email_body_text,
            subject_template,
        }
    }

    fn build_email(&self, event: &ServiceEvent) -> OutgoingEmail {
        OutgoingEmail::compose(
            &self.email_from,
            &self.email_to,
            self.subject_template.render(event),
            &self.email_body_text,
        )
    }
}

impl<R: MailRelay> UpcomingOutputGateway for EmailOutputGateway<R> {
    fn notify(&self, event: &ServiceEvent) -> Result<(), NotifyError> {
        let email = self.build_email(event);

        match self.relay.deliver(&self.session, &email) {
            Ok(()) => {
                info!("Notification handed to relay: subject={:?}", email.subject);
                log_notify_event(
                    event.service_type.as_word(),
                    self.session.username(),
                    true,
                    None,
                );
                Ok(())
            }
            Err(e) => {
                warn!("Notification not sent: {}", e);
                log_notify_event(
                    event.service_type.as_word(),
                    self.session.username(),
                    false,
                    Some(&e.to_string()),
                );
                Err(NotifyError)
            }
        }
    }
}
