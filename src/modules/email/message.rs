use std::str::FromStr;

use lettre::address::AddressError;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::Message;

/// Mailbox the notification is sent from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailFrom(pub Mailbox);

/// Mailbox the notification is sent to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailTo(pub Mailbox);

impl FromStr for EmailFrom {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(EmailFrom)
    }
}

impl FromStr for EmailTo {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(EmailTo)
    }
}

/// Plain-text body shared by every notification from one gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailBodyText(pub String);

impl EmailBodyText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

/// One outgoing notification, built per call and dropped once sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: Mailbox,
    pub to: Mailbox,
    pub subject: String,
    pub body: String,
}

impl OutgoingEmail {
    pub fn compose(from: &EmailFrom, to: &EmailTo, subject: String, body: &EmailBodyText) -> Self {
        Self {
            from: from.0.clone(),
            to: to.0.clone(),
            subject,
            body: body.0.clone(),
        }
    }

    /// Build the single-part plain-text message handed to the transport
    pub fn to_message(&self) -> Result<Message, lettre::error::Error> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(self.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(self.body.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_email() -> OutgoingEmail {
        OutgoingEmail::compose(
            &"bins@domain.com".parse().unwrap(),
            &"household@domain.com".parse().unwrap(),
            "Collection reminder: Refuse".to_string(),
            &EmailBodyText::new("Put the bins out tonight."),
        )
    }

    #[test]
    fn test_address_parsing() {
        assert!("mailbox@domain.com".parse::<EmailFrom>().is_ok());
        assert!("Bin Day <mailbox@domain.com>".parse::<EmailTo>().is_ok());
        assert!(" mailbox@domain.com ".parse::<EmailTo>().is_ok());

        assert!("not an address".parse::<EmailFrom>().is_err());
        assert!("".parse::<EmailTo>().is_err());
        assert!("mailbox@".parse::<EmailTo>().is_err());
    }

    #[test]
    fn test_compose_copies_fixed_fields() {
        let email = sample_email();

        assert_eq!(email.from.email.to_string(), "bins@domain.com");
        assert_eq!(email.to.email.to_string(), "household@domain.com");
        assert_eq!(email.subject, "Collection reminder: Refuse");
        assert_eq!(email.body, "Put the bins out tonight.");
    }

    #[test]
    fn test_message_has_single_sender_and_recipient() {
        let message = sample_email().to_message().unwrap();
        let envelope = message.envelope();

        assert_eq!(
            envelope.from().map(|a| a.to_string()),
            Some("bins@domain.com".to_string())
        );
        assert_eq!(envelope.to().len(), 1);
        assert_eq!(envelope.to()[0].to_string(), "household@domain.com");
    }

    #[test]
    fn test_message_is_plain_text_with_subject_and_body() {
        let message = sample_email().to_message().unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(formatted.contains("Subject: Collection reminder: Refuse"));
        assert!(formatted.contains("Content-Type: text/plain; charset=utf-8"));
        assert!(formatted.contains("Put the bins out tonight."));
        assert!(!formatted.contains("multipart"));
        assert!(!formatted.contains("Cc:"));
        assert!(!formatted.contains("Bcc:"));
    }
}
