//! Export schedule and export-log models
//!
//! This is where most of the normalization lives. Export configs and logs are
//! the two resources whose wire shape has drifted across backend versions, so
//! every variant ever observed gets an explicit adapter here and nothing
//! outside this module sees raw wire values.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

/// Deserialize the backend's `active` flag, which has been an integer (`0`/`1`),
/// a boolean, and a string (`"0"`/`"1"`) in different backend versions.
pub(crate) fn de_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Str(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Int(n) => Ok(n != 0),
        Flag::Str(s) => Ok(s == "1" || s.eq_ignore_ascii_case("true")),
    }
}

/// Destination for a scheduled export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportTarget {
    Local,
    Ftp,
    S3,
}

impl std::fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportTarget::Local => write!(f, "local"),
            ExportTarget::Ftp => write!(f, "ftp"),
            ExportTarget::S3 => write!(f, "s3"),
        }
    }
}

impl std::str::FromStr for ExportTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(ExportTarget::Local),
            "ftp" => Ok(ExportTarget::Ftp),
            "s3" => Ok(ExportTarget::S3),
            other => Err(format!(
                "unknown export target '{}', expected local, ftp or s3",
                other
            )),
        }
    }
}

/// A recurring export job definition, normalized
#[derive(Debug, Clone, Serialize)]
pub struct ExportSchedule {
    pub id: i64,
    pub cron: String,
    pub target: ExportTarget,
    pub path: String,
    pub backup_database: String,
    pub active: bool,
    pub created_at: Option<String>,
}

/// Wire shape of an export config. Field casing has flipped between camelCase
/// and snake_case across versions; `active` takes the flexible decoder.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExportScheduleWire {
    id: i64,
    cron: String,
    target: ExportTarget,
    #[serde(default)]
    path: String,
    #[serde(alias = "backup_database")]
    backup_database: String,
    #[serde(default, deserialize_with = "de_flag")]
    active: bool,
    #[serde(default, alias = "created_at")]
    created_at: Option<String>,
}

impl ExportScheduleWire {
    pub(crate) fn into_schedule(self) -> ExportSchedule {
        ExportSchedule {
            id: self.id,
            cron: self.cron,
            target: self.target,
            path: self.path,
            backup_database: self.backup_database,
            active: self.active,
            created_at: self.created_at,
        }
    }
}

/// Payload for creating or updating an export schedule.
///
/// The cron string is opaque to the client; the backend owns its semantics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub cron: String,
    pub target: ExportTarget,
    pub path: String,
    pub backup_database: String,
}

/// Canonical status of one export run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStatus {
    Success,
    Error,
    Running,
}

impl ExportStatus {
    /// Map a raw backend status onto the canonical enum.
    ///
    /// Case-insensitive; "SUCESS" is a known backend misspelling of success.
    /// Anything unrecognized is treated as still running.
    pub fn from_wire(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("success") || raw.eq_ignore_ascii_case("sucess") {
            ExportStatus::Success
        } else if raw.eq_ignore_ascii_case("error") {
            ExportStatus::Error
        } else {
            ExportStatus::Running
        }
    }
}

impl std::fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportStatus::Success => write!(f, "success"),
            ExportStatus::Error => write!(f, "error"),
            ExportStatus::Running => write!(f, "running"),
        }
    }
}

/// One export run, normalized
#[derive(Debug, Clone, Serialize)]
pub struct ExportLogEntry {
    pub id: i64,
    pub schedule_id: i64,
    pub status: ExportStatus,
    pub message: String,
    pub created_at: String,
}

/// Wire shape of a single export-log row. The back-reference and the
/// timestamp have each shipped under two names.
#[derive(Debug, Deserialize)]
pub(crate) struct ExportLogEntryWire {
    id: i64,
    #[serde(default, alias = "scheduleId", alias = "export_id")]
    schedule_id: i64,
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default, alias = "startTime")]
    created_at: Option<String>,
}

impl ExportLogEntryWire {
    fn into_entry(self) -> ExportLogEntry {
        ExportLogEntry {
            id: self.id,
            schedule_id: self.schedule_id,
            status: ExportStatus::from_wire(&self.status),
            message: self.message,
            created_at: self.created_at.unwrap_or_default(),
        }
    }
}

/// Aggregate counters over export runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportLogStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default, alias = "sucess", alias = "success")]
    pub succeeded: u64,
    #[serde(default)]
    pub failed: u64,
}

/// Wire shapes seen for `/export/export-logs`: a `{logs, stats}` envelope or a
/// bare array of rows.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ExportLogsWire {
    Envelope {
        logs: Vec<ExportLogEntryWire>,
        #[serde(default)]
        stats: Option<ExportLogStats>,
    },
    Bare(Vec<ExportLogEntryWire>),
}

/// Normalized export run history with aggregate counters.
#[derive(Debug, Clone, Serialize)]
pub struct ExportLogReport {
    pub entries: Vec<ExportLogEntry>,
    pub stats: ExportLogStats,
}

impl ExportLogsWire {
    pub(crate) fn into_report(self) -> ExportLogReport {
        let (rows, stats) = match self {
            ExportLogsWire::Envelope { logs, stats } => (logs, stats),
            ExportLogsWire::Bare(logs) => (logs, None),
        };

        let entries: Vec<ExportLogEntry> =
            rows.into_iter().map(ExportLogEntryWire::into_entry).collect();

        let stats = stats.unwrap_or_else(|| recompute_stats(&entries));

        ExportLogReport { entries, stats }
    }
}

/// Counters recomputed from the rows when the backend sends none.
fn recompute_stats(entries: &[ExportLogEntry]) -> ExportLogStats {
    ExportLogStats {
        total: entries.len() as u64,
        succeeded: entries
            .iter()
            .filter(|e| e.status == ExportStatus::Success)
            .count() as u64,
        failed: entries
            .iter()
            .filter(|e| e.status == ExportStatus::Error)
            .count() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Deserialize)]
    struct FlagHolder {
        #[serde(deserialize_with = "de_flag")]
        active: bool,
    }

    #[test]
    fn test_flag_accepts_every_historical_encoding() {
        for (raw, expected) in [
            (r#"{"active": 1}"#, true),
            (r#"{"active": 0}"#, false),
            (r#"{"active": true}"#, true),
            (r#"{"active": false}"#, false),
            (r#"{"active": "1"}"#, true),
            (r#"{"active": "0"}"#, false),
        ] {
            let holder: FlagHolder = serde_json::from_str(raw).unwrap();
            assert_eq!(holder.active, expected, "input: {}", raw);
        }
    }

    #[test]
    fn test_status_normalization_table() {
        for raw in ["SUCCESS", "success", "SUCESS", "Sucess"] {
            assert_eq!(ExportStatus::from_wire(raw), ExportStatus::Success);
        }
        for raw in ["ERROR", "error", "Error"] {
            assert_eq!(ExportStatus::from_wire(raw), ExportStatus::Error);
        }
        for raw in ["RUNNING", "running", "FAILED", "queued", ""] {
            assert_eq!(ExportStatus::from_wire(raw), ExportStatus::Running);
        }
    }

    #[test]
    fn test_schedule_wire_camel_case_with_int_flag() {
        let wire: ExportScheduleWire = serde_json::from_str(
            r#"{"id":3,"cron":"0 2 * * *","target":"ftp","path":"/backups",
                "backupDatabase":"orders_db","active":1,"createdAt":"2025-05-01"}"#,
        )
        .unwrap();
        let schedule = wire.into_schedule();

        assert_eq!(schedule.id, 3);
        assert_eq!(schedule.target, ExportTarget::Ftp);
        assert!(schedule.active);
        assert_eq!(schedule.backup_database, "orders_db");
    }

    #[test]
    fn test_schedule_wire_snake_case_with_bool_flag() {
        let wire: ExportScheduleWire = serde_json::from_str(
            r#"{"id":4,"cron":"0 3 * * *","target":"local","path":"/srv",
                "backup_database":"stock_db","active":false}"#,
        )
        .unwrap();
        let schedule = wire.into_schedule();

        assert_eq!(schedule.backup_database, "stock_db");
        assert!(!schedule.active);
        assert_eq!(schedule.created_at, None);
    }

    #[test]
    fn test_export_logs_bare_array_shape() {
        let wire: ExportLogsWire = serde_json::from_str(
            r#"[{"id":1,"schedule_id":3,"status":"SUCCESS","message":"ok",
                 "created_at":"2025-06-01 02:00:00"}]"#,
        )
        .unwrap();
        let report = wire.into_report();

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].status, ExportStatus::Success);
        assert_eq!(report.stats.total, 1);
        assert_eq!(report.stats.succeeded, 1);
        assert_eq!(report.stats.failed, 0);
    }

    #[test]
    fn test_export_logs_envelope_shape_keeps_backend_stats() {
        let wire: ExportLogsWire = serde_json::from_str(
            r#"{"logs":[{"id":9,"schedule_id":2,"status":"SUCESS","message":"done",
                        "startTime":"2025-06-02 02:00:00"}],
                "stats":{"total":40,"sucess":38,"failed":2}}"#,
        )
        .unwrap();
        let report = wire.into_report();

        assert_eq!(report.entries[0].status, ExportStatus::Success);
        assert_eq!(report.entries[0].created_at, "2025-06-02 02:00:00");
        assert_eq!(report.stats.total, 40);
        assert_eq!(report.stats.succeeded, 38);
        assert_eq!(report.stats.failed, 2);
    }

    #[test]
    fn test_export_payload_wire_casing() {
        let payload = ExportPayload {
            cron: "0 2 * * *".to_string(),
            target: ExportTarget::S3,
            path: "bucket/backups".to_string(),
            backup_database: "orders_db".to_string(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "cron": "0 2 * * *",
                "target": "s3",
                "path": "bucket/backups",
                "backupDatabase": "orders_db"
            })
        );
    }
}
