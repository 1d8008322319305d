//! Backup triggering
//!
//! The precondition check runs before the request is built; an invalid
//! request never touches the network.

use crate::client::ApiClient;
use crate::error::{validation_error, ApiResult};
use crate::models::BackupRequest;
use tracing::info;
use validator::{Validate, ValidationErrors};

impl ApiClient {
    /// Trigger a one-shot backup job on the backend.
    pub async fn create_backup(&self, request: &BackupRequest) -> ApiResult<()> {
        request
            .validate()
            .map_err(|e| validation_error(validation_message(&e)))?;

        self.post_unit(&["sync", "backup"], request).await?;
        info!(
            source = %request.source_database,
            target = %request.backup_database,
            tables = request.tables.len(),
            "backup job submitted"
        );
        Ok(())
    }
}

/// Flatten validator output into one operator-readable line.
fn validation_message(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors.iter() {
            match &error.message {
                Some(message) => parts.push(message.to_string()),
                None => parts.push(format!("{} is invalid", field)),
            }
        }
    }
    parts.sort();
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::error::ApiError;
    use crate::models::BackupTable;
    use crate::session::MemoryTokenStore;
    use std::sync::Arc;

    fn offline_client() -> ApiClient {
        // Points at a reserved port nothing listens on; a test that reaches
        // the network would fail with RequestFailed instead of Validation.
        let mut settings = Settings::default();
        settings.base_url = url::Url::parse("http://127.0.0.1:9").unwrap();
        ApiClient::new(&settings, Arc::new(MemoryTokenStore::new())).unwrap()
    }

    #[tokio::test]
    async fn test_empty_tables_rejected_before_network() {
        let client = offline_client();
        let request = BackupRequest {
            source_database: "orders_db".to_string(),
            backup_database: "orders_db_bkp".to_string(),
            backup_host: "192.168.0.235".to_string(),
            backup_user: "syncuser".to_string(),
            backup_password: "secret".to_string(),
            tables: Vec::new(),
        };

        let err = client.create_backup(&request).await.unwrap_err();
        match err {
            ApiError::Validation(message) => {
                assert!(message.contains("at least one table"), "got: {}", message)
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_names_collected_into_one_message() {
        let client = offline_client();
        let request = BackupRequest {
            source_database: String::new(),
            backup_database: String::new(),
            backup_host: String::new(),
            backup_user: String::new(),
            backup_password: String::new(),
            tables: vec![BackupTable {
                name: "pedidos".to_string(),
                columns: "*".to_string(),
            }],
        };

        let err = client.create_backup(&request).await.unwrap_err();
        match err {
            ApiError::Validation(message) => {
                assert!(message.contains("source database"));
                assert!(message.contains("backup database"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
