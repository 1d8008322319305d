//! Authentication and user management operations
//!
//! Login failures are deliberately opaque: whatever the backend says, the
//! operator sees a generic credentials message and the detail goes to the
//! debug log only.

use crate::client::{backend_message, ApiClient};
use crate::error::{auth_error, ApiResult};
use crate::models::{NewUser, UserAccount, UserUpdate};
use crate::session::{decode_claims, Session};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    // Wire name kept from the original backend contract; the value is the
    // raw password and the backend hashes it.
    password_hash: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

impl ApiClient {
    /// Authenticate and persist the bearer token in the session store.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<()> {
        let payload = LoginRequest {
            username,
            password_hash: password,
        };
        let builder = self.request(Method::POST, &["auth", "login"]).json(&payload);
        let (status, body) = self.execute(builder).await?;

        if !status.is_success() {
            if let Some(detail) = backend_message(&body) {
                debug!(status = status.as_u16(), %detail, "login rejected by backend");
            }
            return Err(auth_error("invalid username or password"));
        }

        let response: LoginResponse = serde_json::from_slice(&body)?;
        self.session().save(&response.token)?;
        info!(username, "logged in");
        Ok(())
    }

    /// Forget the stored token. Takes effect on the next request.
    pub fn logout(&self) -> ApiResult<()> {
        self.session().clear()
    }

    /// The current session, if a token is stored.
    ///
    /// Claims are best-effort: an opaque (non-JWT) token still counts as a
    /// session, just without a display name.
    pub fn current_session(&self) -> Option<Session> {
        let token = self.session().load()?;
        let claims = decode_claims(&token).ok();
        Some(Session { token, claims })
    }

    pub async fn list_users(&self) -> ApiResult<Vec<UserAccount>> {
        self.get_json(&["auth", "users"]).await
    }

    pub async fn create_user(&self, user: &NewUser) -> ApiResult<()> {
        self.post_unit(&["auth", "users"], user).await
    }

    /// Apply a partial update. A blank password is stripped before sending so
    /// the stored credential is never overwritten with an empty string.
    pub async fn update_user(&self, id: i64, update: UserUpdate) -> ApiResult<()> {
        let update = update.without_blank_password();
        self.put_unit(&["auth", "users", &id.to_string()], &update)
            .await
    }

    pub async fn delete_user(&self, id: i64) -> ApiResult<()> {
        self.delete_unit(&["auth", "users", &id.to_string()]).await
    }
}
