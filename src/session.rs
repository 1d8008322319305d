//! Session token storage and inspection
//!
//! The bearer token is the sole authority for "logged in". It is persisted
//! outside the process (the CLI analog of the dashboard's fixed storage key)
//! and read back fresh on every request, so a logout or re-login takes effect
//! on the very next call with no invalidation step.

use crate::error::{auth_error, ApiError, ApiResult};
use crate::models::user::UserRole;
use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Pluggable storage for the bearer token.
///
/// The client never caches the token in memory; it asks the store on each
/// request. Tests substitute [`MemoryTokenStore`] instead of touching the
/// filesystem.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> ApiResult<()>;
    fn clear(&self) -> ApiResult<()>;
}

/// Token store backed by a single file on disk.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn save(&self, token: &str) -> ApiResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ApiError::Config(format!("Cannot create token directory: {}", e))
            })?;
        }
        fs::write(&self.path, token)
            .map_err(|e| ApiError::Config(format!("Cannot write token file: {}", e)))
    }

    fn clear(&self) -> ApiResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::Config(format!("Cannot remove token file: {}", e))),
        }
    }
}

/// In-memory token store for tests and embedders.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().ok()?.clone()
    }

    fn save(&self, token: &str) -> ApiResult<()> {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
        Ok(())
    }

    fn clear(&self) -> ApiResult<()> {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
        Ok(())
    }
}

/// A live session: the stored token plus whatever claims it exposes.
///
/// `claims` is best-effort; an opaque token still authenticates, it just has
/// nothing to display.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub claims: Option<Claims>,
}

/// Claims the backend embeds in its tokens.
///
/// Decoded WITHOUT signature verification: the client has no secret and the
/// values gate display only. The backend re-checks authorization on every
/// request regardless of what these say.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl Claims {
    /// Token expiry as a timestamp, when the claim is present and sane.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }
}

/// Decode the display claims from a bearer token.
///
/// Accepts any HMAC algorithm the backend has historically used. Fails only
/// when the token is not a JWT at all, in which case the session is unusable
/// and the operator has to log in again.
pub fn decode_claims(token: &str) -> ApiResult<Claims> {
    let mut validation = Validation::default();
    validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = jsonwebtoken::decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| auth_error(format!("Stored session token is not usable: {}", e)))?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use pretty_assertions::assert_eq;

    fn make_token(claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(b"some-backend-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_claims_without_secret() {
        let token = make_token(&Claims {
            username: "operator".to_string(),
            role: UserRole::Admin,
            exp: Some(4_102_444_800),
        });

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.username, "operator");
        assert_eq!(claims.role, UserRole::Admin);
        assert!(claims.expires_at().is_some());
    }

    #[test]
    fn test_decode_claims_rejects_opaque_token() {
        let err = decode_claims("definitely-not-a-jwt").unwrap_err();
        assert!(err.is_auth());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load(), None);

        store.save("abc123").unwrap();
        assert_eq!(store.load(), Some("abc123".to_string()));

        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_file_store_ignores_blank_file() {
        let path = std::env::temp_dir().join("datasync-test-blank-token");
        std::fs::write(&path, "  \n").unwrap();

        let store = FileTokenStore::new(path.clone());
        assert_eq!(store.load(), None);

        let _ = std::fs::remove_file(path);
    }
}
