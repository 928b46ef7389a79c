use std::sync::Mutex;

use collection_notifier::email::{
    MailRelay, OutgoingEmail, SessionSettings, SmtpCredentials, SmtpRelay, SmtpSession,
};
use log::{Level, LevelFilter, Log, Metadata, Record};

// Records every log line so the test can inspect what the relay reported
struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

static UNREACHABLE_RELAY: SessionSettings = SessionSettings {
    host: "127.0.0.1",
    port: 1,
    starttls_required: true,
    debug: true,
    auth: true,
};

#[test]
fn test_failed_session_is_logged_in_detail() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let session = SmtpSession::new(
        &UNREACHABLE_RELAY,
        SmtpCredentials::new("mailbox@domain.com", "asdjf39ru4fsj"),
    );
    let email = OutgoingEmail {
        from: "mailbox@domain.com".parse().unwrap(),
        to: "mailbox@domain.com".parse().unwrap(),
        subject: "email subject".to_string(),
        body: "email body text".to_string(),
    };

    assert!(SmtpRelay.deliver(&session, &email).is_err());

    let records = LOGGER.records.lock().unwrap();
    let debug_lines: Vec<&String> = records
        .iter()
        .filter(|(level, _)| *level == Level::Debug)
        .map(|(_, line)| line)
        .collect();

    assert!(debug_lines.len() > 1, "only got: {:?}", debug_lines);
    assert!(debug_lines
        .iter()
        .any(|line| line.starts_with("Opening SMTP session")));
    assert!(debug_lines
        .iter()
        .any(|line| line.contains("STARTTLS required")));
    assert!(debug_lines
        .iter()
        .any(|line| line.starts_with("SMTP session failed: host=127.0.0.1, port=1")));
    assert!(records
        .iter()
        .all(|(_, line)| !line.contains("asdjf39ru4fsj")));
}
