use env_logger::{Builder, Env, WriteStyle};
use log::{info, warn};
use std::borrow::Cow;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Initialize logging to stderr, or to `log_file` when one is given.
///
/// `RUST_LOG` overrides the default `info` level.
pub fn initialize_logging(log_file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder
        .format(|buf, record| {
            let message = record.args().to_string();
            writeln!(
                buf,
                "[{} {} {}] {}",
                buf.timestamp_seconds(),
                record.level(),
                record.module_path().unwrap_or_default(),
                redact_smtp_auth(&message)
            )
        })
        .write_style(WriteStyle::Auto);

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;

    info!("Logging system initialized");
    Ok(())
}

/// Hide the credentials in an `AUTH` command traced by lettre.
///
/// lettre traces each command it writes as `Wrote: ...`, which includes the
/// base64 credentials of `AUTH PLAIN`.
pub(crate) fn redact_smtp_auth(line: &str) -> Cow<'_, str> {
    if !line.starts_with("Wrote: ") {
        return Cow::Borrowed(line);
    }
    match line.find("AUTH ") {
        Some(start) => {
            let mechanism = line[start + 5..].split_whitespace().next().unwrap_or("");
            Cow::Owned(format!("{}AUTH {} <redacted>", &line[..start], mechanism))
        }
        None => Cow::Borrowed(line),
    }
}

/// Helper function to format sensitive data for logging
pub(crate) fn format_sensitive(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

/// Structured record of one notification attempt
pub fn log_notify_event(service: &str, username: &str, success: bool, details: Option<&str>) {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    if success {
        info!(
            "Notify event: service={}, user={}, success=true, timestamp={}, details={:?}",
            service,
            format_sensitive(username),
            timestamp,
            details
        );
    } else {
        warn!(
            "Notify event: service={}, user={}, success=false, timestamp={}, details={:?}",
            service,
            format_sensitive(username),
            timestamp,
            details
        );
    }
}
