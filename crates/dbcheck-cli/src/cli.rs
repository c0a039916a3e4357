//! `dbcheck` - run the startup database gate once and report the verdict
//!
//! Exit codes: 0 normal, 2 setup required, 1 bad configuration (including an
//! unreachable server) or startup failure.

mod args;
mod logging;
mod report;

use anyhow::{Context, bail};
use clap::Parser;
use dbcheck_core::{Connection, DbCheckError};
use dbcheck_driver_mysql::{MySqlConnection, redact_url};
use dbcheck_gate::{DatabaseGate, GateError, GateVerdict, OperatingMode};
use std::process::ExitCode;

use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = match logging::init(args.logging_config()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: failed to initialize logging: {e:#}");
            return ExitCode::from(1);
        }
    };

    match run(&args).await {
        Ok(mode) => ExitCode::from(exit_code(mode)),
        Err(e) => {
            tracing::error!(error = ?e, "dbcheck failed");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<OperatingMode> {
    let config = args.gate_config()?;
    if config.connection_string.is_empty() {
        bail!("no connection string: pass --db-conn or set DBCHECK_DB_CONN");
    }

    tracing::info!(
        connection = %redact_url(&config.connection_string),
        db_type = ?config.db_type,
        "connecting to database"
    );
    let verdict = match MySqlConnection::connect(&config.connection_string).await {
        Ok(conn) => {
            let mut gate = DatabaseGate::new(config);
            let verdict = gate.check(&conn).await;
            if let Err(e) = conn.close().await {
                tracing::warn!(error = %e, "failed to close database connection");
            }
            verdict
        }
        Err(e) => {
            let verdict = connection_failure_verdict(&e);
            tracing::error!(error = %e, "entering bad database mode");
            verdict
        }
    };

    print_verdict(&verdict, args.json)?;
    Ok(verdict.mode)
}

/// The front end still needs a verdict when the server cannot be reached
fn connection_failure_verdict(error: &DbCheckError) -> GateVerdict {
    GateVerdict::from_error(&GateError::Connection {
        context: "Can't connect to database",
        detail: error.to_string(),
    })
}

fn print_verdict(verdict: &GateVerdict, json: bool) -> anyhow::Result<()> {
    let output = if json {
        serde_json::to_string_pretty(verdict).context("failed to serialize verdict")?
    } else {
        report::render_text(verdict)
    };
    println!("{output}");
    Ok(())
}

fn exit_code(mode: OperatingMode) -> u8 {
    match mode {
        OperatingMode::Normal => 0,
        OperatingMode::Setup => 2,
        OperatingMode::BadConfiguration => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(OperatingMode::Normal), 0);
        assert_eq!(exit_code(OperatingMode::Setup), 2);
        assert_eq!(exit_code(OperatingMode::BadConfiguration), 1);
    }

    #[test]
    fn test_connection_failure_becomes_bad_configuration() {
        let err = DbCheckError::Connection("Failed to connect to MySQL: Connection refused".into());

        let verdict = connection_failure_verdict(&err);

        assert_eq!(verdict.mode, OperatingMode::BadConfiguration);
        assert_eq!(verdict.issue_kind, Some(dbcheck_gate::IssueKind::Connection));
        assert_eq!(
            verdict.issue.as_deref(),
            Some(
                "Can't connect to database: Connection error: Failed to connect to MySQL: Connection refused"
            )
        );

        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["mode"], "bad_configuration");
        assert_eq!(json["issue_kind"], "connection");
    }
}
