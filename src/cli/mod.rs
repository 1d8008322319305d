//! Command-line surface
//!
//! One subcommand per dashboard page. Errors are handled here, nearest to the
//! operator: auth problems point at `login`, request failures print a short
//! non-technical line with the detail kept in the debug log.

mod auth;
mod backup;
mod databases;
mod exports;
mod overview;
mod patterns;
mod users;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use datasync_admin::{ApiClient, ApiError};
use std::io::Write;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "datasync-admin",
    version,
    about = "Administer the MySQL DataSync backup/synchronization backend"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login(auth::LoginArgs),
    /// Forget the stored session token
    Logout,
    /// Show the current session
    Whoami,
    /// Connected databases plus recent export runs, side by side
    Overview,
    /// Browse connected databases, their tables and change logs
    #[command(subcommand)]
    Databases(databases::DatabasesCmd),
    /// Trigger a one-shot backup job
    Backup(backup::BackupArgs),
    /// Manage export schedules and their run history
    #[command(subcommand)]
    Exports(exports::ExportsCmd),
    /// Manage backup-candidate name patterns
    #[command(subcommand)]
    Patterns(patterns::PatternsCmd),
    /// Manage dashboard users
    #[command(subcommand)]
    Users(users::UsersCmd),
}

pub async fn run(cli: Cli, client: &ApiClient) -> anyhow::Result<()> {
    let result = match cli.command {
        Commands::Login(args) => auth::login(client, args).await,
        Commands::Logout => auth::logout(client),
        Commands::Whoami => auth::whoami(client),
        Commands::Overview => overview::run(client).await,
        Commands::Databases(cmd) => databases::run(client, cmd).await,
        Commands::Backup(args) => backup::run(client, args).await,
        Commands::Exports(cmd) => exports::run(client, cmd).await,
        Commands::Patterns(cmd) => patterns::run(client, cmd).await,
        Commands::Users(cmd) => users::run(client, cmd).await,
    };

    result.map_err(report)
}

/// Translate a facade error into what the operator should see.
fn report(err: ApiError) -> anyhow::Error {
    match err {
        ApiError::Auth(detail) => {
            debug!(%detail, "authentication failure");
            anyhow!("Not logged in or session expired. Run `datasync-admin login <username>` first.")
        }
        ApiError::Validation(message) => anyhow!("{}", message),
        ApiError::RequestFailed { status, message } => {
            debug!(?status, %message, "request failed");
            anyhow!("Could not talk to the DataSync backend. Check the connection and try again.")
        }
        ApiError::Decode(source) => {
            debug!(error = %source, "undecodable response body");
            anyhow!("The backend answered with an unexpected response. Re-run with RUST_LOG=debug for detail.")
        }
        ApiError::Config(message) => anyhow!("{}", message),
    }
}

/// Read a password from stdin when it was not passed as a flag.
pub(crate) fn prompt_password(label: &str) -> Result<String, ApiError> {
    print!("{}: ", label);
    std::io::stdout()
        .flush()
        .map_err(|e| ApiError::Config(format!("Cannot prompt for password: {}", e)))?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .map_err(|e| ApiError::Config(format!("Cannot read password: {}", e)))?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
