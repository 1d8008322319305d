//! Export schedule commands

use clap::{Args, Subcommand};
use datasync_admin::models::{ExportPayload, ExportSchedule, ExportTarget};
use datasync_admin::{ApiClient, ApiResult};

#[derive(Subcommand)]
pub enum ExportsCmd {
    /// List configured export schedules
    List,
    /// Create a new export schedule
    Create(ExportArgs),
    /// Replace an existing export schedule
    Update {
        id: i64,
        #[command(flatten)]
        args: ExportArgs,
    },
    /// Delete an export schedule
    Delete { id: i64 },
    /// Show the export run history
    Logs,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Five-field cron expression, interpreted by the backend
    #[arg(long, default_value = "0 2 * * *")]
    pub cron: String,
    /// Destination kind: local, ftp or s3
    #[arg(long, default_value = "local")]
    pub target: ExportTarget,
    /// Destination path or bucket
    #[arg(long)]
    pub path: String,
    /// Database whose backup gets exported
    #[arg(long = "database")]
    pub backup_database: String,
}

impl ExportArgs {
    fn into_payload(self) -> ExportPayload {
        ExportPayload {
            cron: self.cron,
            target: self.target,
            path: self.path,
            backup_database: self.backup_database,
        }
    }
}

pub async fn run(client: &ApiClient, cmd: ExportsCmd) -> ApiResult<()> {
    match cmd {
        ExportsCmd::List => list(client).await,
        ExportsCmd::Create(args) => {
            let schedule = client.create_export(&args.into_payload()).await?;
            println!("Export schedule #{} created.", schedule.id);
            Ok(())
        }
        ExportsCmd::Update { id, args } => {
            let schedule = client.update_export(id, &args.into_payload()).await?;
            println!("Export schedule #{} updated.", schedule.id);
            Ok(())
        }
        ExportsCmd::Delete { id } => {
            client.delete_export(id).await?;
            println!("Export schedule #{} deleted.", id);
            Ok(())
        }
        ExportsCmd::Logs => logs(client).await,
    }
}

async fn list(client: &ApiClient) -> ApiResult<()> {
    let schedules = client.list_exports().await?;
    if schedules.is_empty() {
        println!("No export schedules configured.");
        return Ok(());
    }

    println!("{:<5} {:<14} {:<7} {:<20} {:<8} PATH", "ID", "CRON", "TARGET", "DATABASE", "ACTIVE");
    for schedule in &schedules {
        print_schedule(schedule);
    }
    Ok(())
}

fn print_schedule(schedule: &ExportSchedule) {
    println!(
        "{:<5} {:<14} {:<7} {:<20} {:<8} {}",
        schedule.id,
        schedule.cron,
        schedule.target.to_string(),
        schedule.backup_database,
        if schedule.active { "yes" } else { "no" },
        schedule.path
    );
}

async fn logs(client: &ApiClient) -> ApiResult<()> {
    let report = client.export_logs().await?;

    println!(
        "Runs: {} total, {} succeeded, {} failed",
        report.stats.total, report.stats.succeeded, report.stats.failed
    );

    if report.entries.is_empty() {
        println!("No export runs recorded.");
        return Ok(());
    }

    println!();
    for entry in &report.entries {
        println!(
            "[{:<7}] #{:<5} schedule {:<4} {} ({})",
            entry.status.to_string(),
            entry.id,
            entry.schedule_id,
            entry.message,
            entry.created_at
        );
    }
    Ok(())
}
