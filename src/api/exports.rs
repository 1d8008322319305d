//! Export schedule and export-log operations

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::export::{ExportLogsWire, ExportScheduleWire};
use crate::models::{ExportLogReport, ExportPayload, ExportSchedule};

impl ApiClient {
    pub async fn list_exports(&self) -> ApiResult<Vec<ExportSchedule>> {
        let wire: Vec<ExportScheduleWire> = self.get_json(&["export"]).await?;
        Ok(wire
            .into_iter()
            .map(ExportScheduleWire::into_schedule)
            .collect())
    }

    pub async fn create_export(&self, payload: &ExportPayload) -> ApiResult<ExportSchedule> {
        let wire: ExportScheduleWire = self.post_json(&["export"], payload).await?;
        Ok(wire.into_schedule())
    }

    pub async fn update_export(&self, id: i64, payload: &ExportPayload) -> ApiResult<ExportSchedule> {
        let wire: ExportScheduleWire = self
            .put_json(&["export", &id.to_string()], payload)
            .await?;
        Ok(wire.into_schedule())
    }

    pub async fn delete_export(&self, id: i64) -> ApiResult<()> {
        self.delete_unit(&["export", &id.to_string()]).await
    }

    /// Export run history, normalized across every known wire shape.
    pub async fn export_logs(&self) -> ApiResult<ExportLogReport> {
        let wire: ExportLogsWire = self.get_json(&["export", "export-logs"]).await?;
        Ok(wire.into_report())
    }
}
