//! Database browsing commands

use clap::Subcommand;
use datasync_admin::{ApiClient, ApiResult};

#[derive(Subcommand)]
pub enum DatabasesCmd {
    /// List connected databases
    List {
        /// Only show databases whose name contains this substring
        #[arg(long)]
        filter: Option<String>,
    },
    /// List the tables of one database
    Tables { database: String },
    /// Show sync status and recent change log of one database
    Logs { database: String },
}

pub async fn run(client: &ApiClient, cmd: DatabasesCmd) -> ApiResult<()> {
    match cmd {
        DatabasesCmd::List { filter } => list(client, filter).await,
        DatabasesCmd::Tables { database } => tables(client, &database).await,
        DatabasesCmd::Logs { database } => logs(client, &database).await,
    }
}

async fn list(client: &ApiClient, filter: Option<String>) -> ApiResult<()> {
    let mut databases = client.list_databases().await?;

    if let Some(needle) = filter {
        let needle = needle.to_lowercase();
        databases.retain(|db| db.name.to_lowercase().contains(&needle));
    }

    if databases.is_empty() {
        println!("No databases found.");
        return Ok(());
    }

    let width = databases.iter().map(|db| db.name.len()).max().unwrap_or(4);
    println!("{:<width$}  {:<8}  KIND", "NAME", "STATUS", width = width.max(4));
    for db in &databases {
        println!(
            "{:<width$}  {:<8}  {}",
            db.name,
            db.status.to_string(),
            db.kind,
            width = width.max(4)
        );
    }
    println!();
    println!("Total: {} database(s)", databases.len());
    Ok(())
}

async fn tables(client: &ApiClient, database: &str) -> ApiResult<()> {
    let tables = client.list_tables(database).await?;
    if tables.is_empty() {
        println!("No tables in '{}'.", database);
        return Ok(());
    }

    for table in &tables {
        println!("{}", table);
    }
    println!();
    println!("Total: {} table(s) in '{}'", tables.len(), database);
    Ok(())
}

async fn logs(client: &ApiClient, database: &str) -> ApiResult<()> {
    let report = client.database_logs(database).await?;

    println!("Database: {}", database);
    println!("Status:   {}", report.status);
    println!("Events:   {}", report.total_count);
    if let Some(checkpoint) = &report.checkpoint {
        println!(
            "Last checkpoint: {} on {} at {}",
            checkpoint.event_type, checkpoint.table_name, checkpoint.created_at
        );
    }

    if report.logs.is_empty() {
        println!();
        println!("No change events recorded.");
        return Ok(());
    }

    println!();
    for entry in &report.logs {
        let data = serde_json::to_string(&entry.event_data).unwrap_or_default();
        println!(
            "[{}] {} {} {}",
            entry.created_at, entry.event_type, entry.table_name, data
        );
    }
    Ok(())
}
