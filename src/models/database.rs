//! Database and change-log models
//!
//! The backend guarantees very little about a database beyond its name; the
//! rest of [`DatabaseRef`] is synthesized client-side so every consumer sees a
//! uniform record.

use serde::{Deserialize, Serialize};

/// Status attached to a database reference.
///
/// Not backend-verified: lists default to `Active`, and only a failed log
/// fetch downgrades the display to offline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseStatus {
    Active,
    Inactive,
}

impl std::fmt::Display for DatabaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseStatus::Active => write!(f, "active"),
            DatabaseStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// A connected database as shown to the operator
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseRef {
    pub name: String,
    pub status: DatabaseStatus,
    /// Engine kind; the backend never reports one
    pub kind: String,
}

impl DatabaseRef {
    pub fn from_name(name: String) -> Self {
        Self {
            name,
            status: DatabaseStatus::Active,
            kind: "unknown".to_string(),
        }
    }
}

/// Wire shapes seen for `/sync/databases` across backend versions: a bare
/// array of name strings, or `{value, label}` option objects.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum DatabaseNameWire {
    Name(String),
    Labeled { value: String },
}

impl DatabaseNameWire {
    pub(crate) fn into_ref(self) -> DatabaseRef {
        match self {
            DatabaseNameWire::Name(name) => DatabaseRef::from_name(name),
            DatabaseNameWire::Labeled { value } => DatabaseRef::from_name(value),
        }
    }
}

/// One replicated change event from the per-database log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    pub id: i64,
    pub event_type: String,
    pub table_name: String,
    #[serde(default)]
    pub event_data: serde_json::Value,
    #[serde(default)]
    pub created_at: String,
}

/// Per-database sync status plus its recent change log.
///
/// A failed fetch is represented as a value (`offline`), not an error, so one
/// unreachable database never blanks the rest of a page.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseLogs {
    pub status: String,
    pub checkpoint: Option<ChangeLogEntry>,
    pub logs: Vec<ChangeLogEntry>,
    pub total_count: u64,
}

impl DatabaseLogs {
    /// Degraded result used when the backend cannot be reached.
    pub fn offline() -> Self {
        Self {
            status: "offline".to_string(),
            checkpoint: None,
            logs: Vec::new(),
            total_count: 0,
        }
    }
}

/// Wire shape of `/sync/backup/:database/logs`. The total has gone by two
/// names; older backends omit it entirely.
#[derive(Debug, Deserialize)]
pub(crate) struct DatabaseLogsWire {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    checkpoint: Option<ChangeLogEntry>,
    #[serde(default)]
    logs: Vec<ChangeLogEntry>,
    #[serde(default, alias = "totalLogs", alias = "totalCount")]
    total: Option<u64>,
}

impl DatabaseLogsWire {
    pub(crate) fn into_logs(self) -> DatabaseLogs {
        let total_count = self.total.unwrap_or(self.logs.len() as u64);
        DatabaseLogs {
            status: self.status.unwrap_or_else(|| "unknown".to_string()),
            checkpoint: self.checkpoint,
            logs: self.logs,
            total_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bare_name_list_becomes_refs() {
        let wire: Vec<DatabaseNameWire> =
            serde_json::from_str(r#"["db_a","db_b"]"#).unwrap();
        let refs: Vec<DatabaseRef> = wire.into_iter().map(DatabaseNameWire::into_ref).collect();

        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].name, "db_a");
        assert_eq!(refs[1].name, "db_b");
        assert_eq!(refs[0].status, DatabaseStatus::Active);
    }

    #[test]
    fn test_labeled_name_list_becomes_refs() {
        let wire: Vec<DatabaseNameWire> = serde_json::from_str(
            r#"[{"value":"orders_db","label":"Orders"},{"value":"stock_db","label":"Stock"}]"#,
        )
        .unwrap();
        let refs: Vec<DatabaseRef> = wire.into_iter().map(DatabaseNameWire::into_ref).collect();

        assert_eq!(refs[0].name, "orders_db");
        assert_eq!(refs[1].name, "stock_db");
    }

    #[test]
    fn test_logs_total_falls_back_to_length() {
        let wire: DatabaseLogsWire = serde_json::from_str(
            r#"{
                "status": "online",
                "logs": [
                    {"id": 1, "event_type": "INSERT", "table_name": "pedidos",
                     "event_data": {"id": 10}, "created_at": "2025-06-01 10:00:00"}
                ]
            }"#,
        )
        .unwrap();

        let logs = wire.into_logs();
        assert_eq!(logs.status, "online");
        assert_eq!(logs.total_count, 1);
        assert!(logs.checkpoint.is_none());
    }

    #[test]
    fn test_logs_total_prefers_reported_count() {
        let wire: DatabaseLogsWire =
            serde_json::from_str(r#"{"status":"online","logs":[],"totalLogs":412}"#).unwrap();
        assert_eq!(wire.into_logs().total_count, 412);
    }

    #[test]
    fn test_offline_fallback_shape() {
        let logs = DatabaseLogs::offline();
        assert_eq!(logs.status, "offline");
        assert!(logs.logs.is_empty());
        assert_eq!(logs.total_count, 0);
    }
}
