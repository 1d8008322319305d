//! Canonical client-side models
//!
//! One stable model per backend resource, plus the serde adapters for every
//! wire shape the backend has historically produced. Presentation code only
//! ever sees the types re-exported here, never a wire variant.

pub mod backup;
pub mod database;
pub mod export;
pub mod pattern;
pub mod user;

// Re-export commonly used types
pub use backup::{BackupRequest, BackupTable};
pub use database::{ChangeLogEntry, DatabaseLogs, DatabaseRef, DatabaseStatus};
pub use export::{
    ExportLogEntry, ExportLogReport, ExportLogStats, ExportPayload, ExportSchedule, ExportStatus,
    ExportTarget,
};
pub use pattern::{BackupPattern, NewPattern, ScanOutcome};
pub use user::{NewUser, UserAccount, UserRole, UserUpdate};
