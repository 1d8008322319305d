//! Dashboard overview command
//!
//! Fetches the database list and the export run history concurrently; the two
//! widgets degrade independently, so one unreachable endpoint never blanks
//! the other. Auth failures are the exception: they abort the whole view.

use datasync_admin::models::{DatabaseRef, ExportLogReport};
use datasync_admin::{ApiClient, ApiResult};
use tracing::warn;

pub async fn run(client: &ApiClient) -> ApiResult<()> {
    let (databases, report) = tokio::join!(client.list_databases(), client.export_logs());

    let databases = widget(databases, "database list")?;
    let report = widget(report, "export history")?;

    print_databases(databases.as_deref());
    println!();
    print_exports(report.as_ref());
    Ok(())
}

/// Keep a widget's failure local unless it is an auth failure.
fn widget<T>(result: ApiResult<T>, label: &str) -> ApiResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_auth() => Err(err),
        Err(err) => {
            warn!(widget = label, error = %err, "widget unavailable");
            Ok(None)
        }
    }
}

fn print_databases(databases: Option<&[DatabaseRef]>) {
    match databases {
        None => println!("Databases: unavailable"),
        Some(databases) => {
            println!("Databases: {} connected", databases.len());
            for db in databases {
                println!("  {} ({})", db.name, db.status);
            }
        }
    }
}

fn print_exports(report: Option<&ExportLogReport>) {
    match report {
        None => println!("Export runs: unavailable"),
        Some(report) => {
            println!(
                "Export runs: {} total, {} succeeded, {} failed",
                report.stats.total, report.stats.succeeded, report.stats.failed
            );
            for entry in report.entries.iter().take(5) {
                println!(
                    "  [{}] schedule {} {} ({})",
                    entry.status, entry.schedule_id, entry.message, entry.created_at
                );
            }
        }
    }
}
