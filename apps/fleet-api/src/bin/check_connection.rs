//! One-shot MongoDB connection check.
//!
//! Uses the same environment configuration and connector as the server,
//! makes a single attempt, lists the collections and explains failures.

use clap::Parser;
use color_eyre::Result;
use core_config::FromEnv;
use database::mongodb::{MongoConfig, MongoConnector, inspect_collections};
use database::{ConnectFailure, Connector, FailureKind};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Check that the configured MongoDB deployment is reachable")]
struct Args {
    /// Connection string; overrides MONGODB_URL and the credential variables
    #[arg(short, long)]
    url: Option<String>,

    /// Database to inspect; overrides MONGODB_DATABASE
    #[arg(short, long)]
    database: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

const RULE: &str = "============================================================";

fn load_config(args: &Args) -> Result<MongoConfig> {
    let mut config = match &args.url {
        Some(url) => MongoConfig::new(url.clone()).with_app_name("check-connection"),
        None => MongoConfig::from_env()?,
    };
    if let Some(database) = &args.database {
        config = config.with_database(database.clone());
    }
    Ok(config)
}

/// Step-by-step remediation for a failed attempt
fn remediation(kind: FailureKind) -> &'static [&'static str] {
    match kind {
        FailureKind::AuthenticationFailure => &[
            "Check the username and password in the connection settings",
            "Verify the user exists under Database Access for the cluster",
        ],
        FailureKind::TlsHandshakeFailure => &[
            "Open the cluster's Network Access page",
            "Add this host's IP address (or 0.0.0.0/0 for testing)",
            "Wait a minute or two for the change to apply",
            "Run check-connection again",
        ],
        FailureKind::NetworkResolutionFailure => &[
            "Check this host's internet connection",
            "Verify the cluster address",
        ],
        FailureKind::Timeout => &[
            "Check that the cluster is running and not paused",
            "Check firewall rules between this host and the cluster",
        ],
        FailureKind::Unclassified => &["Inspect the message above and the server logs"],
    }
}

fn report_failure(failure: &ConnectFailure) {
    eprintln!("\n{RULE}");
    eprintln!("CONNECTION FAILED");
    eprintln!("{RULE}");
    eprintln!("Kind:    {}", failure.kind);
    eprintln!("Message: {}", failure.message);
    eprintln!("\n{}", failure.hint());
    for (step, action) in remediation(failure.kind).iter().enumerate() {
        eprintln!("  {}. {}", step + 1, action);
    }
    eprintln!("{RULE}\n");
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let args = Args::parse();
    let config = load_config(&args)?;

    println!("\n{RULE}");
    println!("MongoDB Connection Check");
    println!("{RULE}");
    println!("URL:      {}", config.redacted_url());
    println!("Database: {}", config.database);
    println!("{RULE}\n");

    if args.verbose {
        println!("Attempt timeout: {}s", config.attempt_timeout_secs);
    }

    println!("Attempting to connect...");
    let limit = config.manager_settings().attempt_timeout;
    let connector = MongoConnector::new(config);

    let db = match tokio::time::timeout(limit, connector.connect()).await {
        Ok(Ok(db)) => db,
        Ok(Err(failure)) => {
            report_failure(&failure);
            return Ok(ExitCode::FAILURE);
        }
        Err(_) => {
            report_failure(&ConnectFailure::timed_out(limit));
            return Ok(ExitCode::FAILURE);
        }
    };
    println!("Connection successful, ping acknowledged");

    let report = inspect_collections(&db).await;
    if !report.healthy {
        let message = report.message.unwrap_or_default();
        report_failure(&ConnectFailure::from_message(message));
        return Ok(ExitCode::FAILURE);
    }

    println!("Database '{}' accessible ({}ms)", db.name(), report.response_time_ms);
    if report.collections.is_empty() {
        println!("Collections found: none");
    } else {
        println!("Collections found: {}", report.collections.join(", "));
    }

    println!("\n{RULE}");
    println!("ALL CHECKS PASSED");
    println!("{RULE}\n");
    Ok(ExitCode::SUCCESS)
}
