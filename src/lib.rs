//! MySQL DataSync - administrative client
//!
//! Typed facade over the DataSync backup/synchronization backend. All real
//! work (backup execution, cron scheduling, log persistence) happens behind
//! the REST API; this crate is the single point of outbound HTTP, responsible
//! for three things:
//!
//! - attaching bearer-token authentication to every request,
//! - one operation per backend endpoint, grouped by resource
//!   (auth, databases, backup, export schedules, patterns),
//! - normalizing the backend's historically inconsistent response shapes
//!   into stable models before anyone renders them.
//!
//! The client is stateless: the only thing that survives between calls is the
//! bearer token in the injected [`session::TokenStore`].

mod api;
mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod session;

pub use client::ApiClient;
pub use config::Settings;
pub use error::{ApiError, ApiResult};
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};
