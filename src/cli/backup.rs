//! Backup trigger command

use clap::Args;
use datasync_admin::models::{BackupRequest, BackupTable};
use datasync_admin::{ApiClient, ApiResult};

#[derive(Args)]
pub struct BackupArgs {
    /// Database to back up
    #[arg(long)]
    pub source: String,
    /// Destination database on the backup host
    #[arg(long = "target")]
    pub backup_database: String,
    /// Backup host address
    #[arg(long)]
    pub host: String,
    /// Credentials on the backup host
    #[arg(long)]
    pub user: String,
    #[arg(long)]
    pub password: String,
    /// Table to include, as `name` or `name:col_a,col_b`; repeatable
    #[arg(long = "table")]
    pub tables: Vec<BackupTable>,
}

pub async fn run(client: &ApiClient, args: BackupArgs) -> ApiResult<()> {
    let request = BackupRequest {
        source_database: args.source,
        backup_database: args.backup_database,
        backup_host: args.host,
        backup_user: args.user,
        backup_password: args.password,
        tables: args.tables,
    };

    client.create_backup(&request).await?;
    println!(
        "Backup started: '{}' -> '{}' ({} table(s))",
        request.source_database,
        request.backup_database,
        request.tables.len()
    );
    Ok(())
}
