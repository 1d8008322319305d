//! Backup pattern operations

use crate::client::ApiClient;
use crate::error::{validation_error, ApiResult};
use crate::models::{BackupPattern, NewPattern, ScanOutcome};

impl ApiClient {
    pub async fn list_patterns(&self) -> ApiResult<Vec<BackupPattern>> {
        self.get_json(&["patterns"]).await
    }

    /// Register a new wildcard pattern. Whitespace-only input is rejected
    /// locally, matching what the dashboard enforced.
    pub async fn create_pattern(&self, pattern: &str) -> ApiResult<()> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(validation_error("pattern must not be empty"));
        }

        self.post_unit(
            &["patterns"],
            &NewPattern {
                pattern: pattern.to_string(),
            },
        )
        .await
    }

    /// Trigger a pattern-based scan for backup candidates.
    ///
    /// The backend's only contract is a human-readable message; nothing here
    /// interprets the result structurally.
    pub async fn scan_patterns(&self) -> ApiResult<ScanOutcome> {
        self.post_empty(&["patterns", "scan"]).await
    }
}
