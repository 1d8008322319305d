//! Backup pattern models
//!
//! A pattern is a SQL-LIKE-style wildcard string (`%`) the backend matches
//! against database names during a scan. The client never interprets it.

use crate::models::export::de_flag;
use serde::{Deserialize, Serialize};

/// A registered backup-candidate pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupPattern {
    pub id: i64,
    pub pattern: String,
    #[serde(default, deserialize_with = "de_flag")]
    pub active: bool,
    #[serde(default, alias = "createdAt")]
    pub created_at: String,
}

/// Payload for registering a new pattern
#[derive(Debug, Clone, Serialize)]
pub struct NewPattern {
    pub pattern: String,
}

/// Result of a pattern scan; the message is the whole contract.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanOutcome {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pattern_with_bool_flag() {
        let pattern: BackupPattern = serde_json::from_str(
            r#"{"id":1,"pattern":"b%_2","active":true,"created_at":"2025-04-01 09:00:00"}"#,
        )
        .unwrap();
        assert_eq!(pattern.pattern, "b%_2");
        assert!(pattern.active);
    }

    #[test]
    fn test_pattern_with_int_flag() {
        let pattern: BackupPattern =
            serde_json::from_str(r#"{"id":2,"pattern":"loja_%","active":0}"#).unwrap();
        assert!(!pattern.active);
        assert_eq!(pattern.created_at, "");
    }

    #[test]
    fn test_scan_outcome_tolerates_empty_body() {
        let outcome: ScanOutcome = serde_json::from_str("{}").unwrap();
        assert_eq!(outcome.message, "");
    }
}
