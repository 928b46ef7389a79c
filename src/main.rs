use std::path::{Path, PathBuf};
use std::process;

use clap::{value_parser, Arg, ArgAction, Command};
use log::{error, info, warn};

use collection_notifier::email::{CredentialStore, SmtpCredentials};
use collection_notifier::utils::logging::initialize_logging;
use collection_notifier::{
    GatewaySettings, LogOutputGateway, ServiceEvent, ServiceType, UpcomingOutputGateway,
};

fn cli() -> Command {
    Command::new("collection-notifier")
        .about("Email reminders for upcoming waste collections")
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Append log output to this file instead of stderr")
                .global(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("notify")
                .about("Send a reminder for one collection")
                .arg(
                    Arg::new("service")
                        .help("The kind of collection: refuse or recycling")
                        .required(true)
                        .value_parser(value_parser!(ServiceType)),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Path to the JSON settings file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Log the notification instead of sending it")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("store-credentials")
                .about("Save SMTP credentials in the system keyring")
                .arg(
                    Arg::new("username")
                        .long("username")
                        .short('u')
                        .help("SMTP account name")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("delete-credentials")
                .about("Remove SMTP credentials from the system keyring"),
        )
}

/// Password from the keyring, if one is stored for this user
fn keyring_password(username: &str) -> Option<String> {
    match CredentialStore::new().and_then(|store| store.get_credentials()) {
        Ok(creds) if creds.username == username => Some(creds.password),
        Ok(_) => {
            warn!("Keyring holds credentials for a different user");
            None
        }
        Err(e) => {
            info!("No usable keyring credentials: {}", e);
            None
        }
    }
}

fn run_notify(
    service_type: ServiceType,
    config: &Path,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let event = ServiceEvent::new(service_type);
    let settings = GatewaySettings::load(config)?;

    if dry_run {
        // Same construction-time checks as a real send, minus the password
        settings.addresses()?;
        LogOutputGateway.notify(&event)?;
        return Ok(());
    }

    let fallback_password = if settings.password.is_some() {
        None
    } else {
        match keyring_password(&settings.username) {
            Some(password) => Some(password),
            None => Some(rpassword::prompt_password("SMTP password: ")?),
        }
    };

    let gateway = settings.build_gateway(fallback_password)?;
    gateway.notify(&event)?;

    info!("{} reminder sent", service_type);
    Ok(())
}

fn run_store_credentials(username: &str) -> Result<(), Box<dyn std::error::Error>> {
    let password = rpassword::prompt_password("SMTP password: ")?;
    if password.trim().is_empty() {
        return Err("Password cannot be empty".into());
    }

    CredentialStore::new()?.store_credentials(&SmtpCredentials::new(username, password))?;
    println!("SMTP credentials saved to the system keyring.");
    Ok(())
}

fn run_delete_credentials() -> Result<(), Box<dyn std::error::Error>> {
    CredentialStore::new()?.delete_credentials()?;
    println!("SMTP credentials removed from the system keyring.");
    Ok(())
}

fn main() {
    let matches = cli().get_matches();

    let log_file = matches.get_one::<PathBuf>("log-file");
    if let Err(e) = initialize_logging(log_file.map(PathBuf::as_path)) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let result = match matches.subcommand() {
        Some(("notify", sub)) => match (
            sub.get_one::<ServiceType>("service"),
            sub.get_one::<PathBuf>("config"),
        ) {
            (Some(service), Some(config)) => {
                run_notify(*service, config, sub.get_flag("dry-run"))
            }
            _ => Err("Missing service or config argument".into()),
        },
        Some(("store-credentials", sub)) => match sub.get_one::<String>("username") {
            Some(username) => run_store_credentials(username),
            None => Err("Missing username".into()),
        },
        Some(("delete-credentials", _)) => run_delete_credentials(),
        _ => Err("Unknown command".into()),
    };

    if let Err(e) = result {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
