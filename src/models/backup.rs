//! Backup request model and its local preconditions
//!
//! Triggering a backup is the one mutation with real client-side validation:
//! a request missing its source, destination, or table selection is rejected
//! before any network round-trip.

use serde::Serialize;
use validator::Validate;

/// A table to include in a backup; `columns` is `"*"` or a comma-separated
/// column list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupTable {
    pub name: String,
    pub columns: String,
}

impl std::str::FromStr for BackupTable {
    type Err = String;

    /// Parse `name` or `name:col_a,col_b` as used on the command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, columns) = match s.split_once(':') {
            Some((name, cols)) => (name, cols),
            None => (s, "*"),
        };

        if name.is_empty() {
            return Err(format!("invalid table spec '{}': empty table name", s));
        }

        Ok(BackupTable {
            name: name.to_string(),
            columns: if columns.is_empty() {
                "*".to_string()
            } else {
                columns.to_string()
            },
        })
    }
}

/// One-shot backup job request
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BackupRequest {
    #[validate(length(min = 1, message = "source database is required"))]
    pub source_database: String,
    #[validate(length(min = 1, message = "backup database is required"))]
    pub backup_database: String,
    pub backup_host: String,
    pub backup_user: String,
    pub backup_password: String,
    #[validate(length(min = 1, message = "select at least one table"))]
    pub tables: Vec<BackupTable>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid_request() -> BackupRequest {
        BackupRequest {
            source_database: "orders_db".to_string(),
            backup_database: "orders_db_bkp".to_string(),
            backup_host: "192.168.0.235".to_string(),
            backup_user: "syncuser".to_string(),
            backup_password: "secret".to_string(),
            tables: vec![BackupTable {
                name: "pedidos".to_string(),
                columns: "*".to_string(),
            }],
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_empty_tables_rejected() {
        let mut request = valid_request();
        request.tables.clear();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_missing_source_rejected() {
        let mut request = valid_request();
        request.source_database.clear();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_table_spec_parsing() {
        let table: BackupTable = "pedidos".parse().unwrap();
        assert_eq!(table.name, "pedidos");
        assert_eq!(table.columns, "*");

        let table: BackupTable = "clientes:id,nome,email".parse().unwrap();
        assert_eq!(table.name, "clientes");
        assert_eq!(table.columns, "id,nome,email");

        assert!(":id".parse::<BackupTable>().is_err());
    }

    #[test]
    fn test_request_wire_casing() {
        let json = serde_json::to_value(valid_request()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "sourceDatabase": "orders_db",
                "backupDatabase": "orders_db_bkp",
                "backupHost": "192.168.0.235",
                "backupUser": "syncuser",
                "backupPassword": "secret",
                "tables": [{"name": "pedidos", "columns": "*"}]
            })
        );
    }
}
