//! MySQL DataSync - administrative CLI
//!
//! Thin front end over the [`datasync_admin`] client library. Configuration
//! comes from the environment, the session token lives in a file between
//! invocations, and each subcommand maps to one page of the product's web
//! dashboard.

mod cli;

use clap::Parser;
use datasync_admin::{ApiClient, FileTokenStore, Settings};
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = cli::Cli::parse();

    let settings = Settings::load()?;
    let session = Arc::new(FileTokenStore::new(settings.token_path.clone()));
    let client = ApiClient::new(&settings, session)?;

    cli::run(args, &client).await
}

/// Initialize tracing with structured logging.
///
/// Quiet by default so log lines do not interleave with command output;
/// RUST_LOG=debug exposes request/response detail for diagnostics.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .compact(),
        )
        .init();
}
