//! Backup pattern commands

use clap::Subcommand;
use datasync_admin::{ApiClient, ApiResult};

#[derive(Subcommand)]
pub enum PatternsCmd {
    /// List registered patterns
    List {
        /// Only show patterns containing this substring
        #[arg(long)]
        filter: Option<String>,
    },
    /// Register a new wildcard pattern (`%` matches anything)
    Create { pattern: String },
    /// Scan for databases matching the registered patterns
    Scan,
}

pub async fn run(client: &ApiClient, cmd: PatternsCmd) -> ApiResult<()> {
    match cmd {
        PatternsCmd::List { filter } => list(client, filter).await,
        PatternsCmd::Create { pattern } => {
            client.create_pattern(&pattern).await?;
            println!("Pattern '{}' registered.", pattern.trim());
            Ok(())
        }
        PatternsCmd::Scan => {
            let outcome = client.scan_patterns().await?;
            if outcome.message.is_empty() {
                println!("Scan triggered.");
            } else {
                println!("{}", outcome.message);
            }
            Ok(())
        }
    }
}

async fn list(client: &ApiClient, filter: Option<String>) -> ApiResult<()> {
    let mut patterns = client.list_patterns().await?;

    if let Some(needle) = filter {
        let needle = needle.to_lowercase();
        patterns.retain(|p| p.pattern.to_lowercase().contains(&needle));
    }

    if patterns.is_empty() {
        println!("No patterns registered.");
        return Ok(());
    }

    println!("{:<5} {:<24} {:<8} CREATED", "ID", "PATTERN", "ACTIVE");
    for pattern in &patterns {
        println!(
            "{:<5} {:<24} {:<8} {}",
            pattern.id,
            pattern.pattern,
            if pattern.active { "yes" } else { "no" },
            pattern.created_at
        );
    }
    Ok(())
}
