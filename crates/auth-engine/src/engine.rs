//! PIN login, logout, and session status.

use crate::{AuthError, AuthResult};
use role_routes::{destination_for, Route};
use session_store::{Session, SessionStore, UserProfile};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Login response envelope from the backend.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<LoginData>,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    token: String,
    user: serde_json::Value,
}

impl LoginResponse {
    fn is_success(&self) -> bool {
        (self.status.as_deref() == Some("success") || self.success == Some(true))
            && self.data.is_some()
    }

    fn failure_message(&self) -> String {
        self.message
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "Login failed".to_string())
    }
}

/// Result of a successful login: the persisted session and where to
/// navigate next.
#[derive(Debug)]
pub struct LoginOutcome {
    pub session: Session,
    pub destination: Route,
}

/// Current authentication status, derived from a fresh storage snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthStatus {
    /// Logged in with a usable session.
    LoggedIn { user_id: String },
    /// Not logged in.
    NotLoggedIn,
}

/// Authentication engine: login, logout, and status over the session store.
pub struct AuthEngine {
    http_client: reqwest::Client,
    api_url: String,
    store: SessionStore,
}

impl AuthEngine {
    /// Create a new auth engine against the given API base URL.
    pub fn new(api_url: impl Into<String>, store: SessionStore) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_url: api_url.into(),
            store,
        }
    }

    /// The underlying session store.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Log in with a mobile number and PIN.
    ///
    /// On success the full session (token, user id, role, profile) is
    /// persisted before the outcome is returned; a failed persist surfaces
    /// as an error and the caller must not treat the login as complete.
    /// The call is unauthenticated; no bearer header is attached.
    pub async fn login_with_pin(&self, mobile: &str, pin: &str) -> AuthResult<LoginOutcome> {
        let login_url = format!("{}/users/login/pin", self.api_url);

        debug!(url = %login_url, mobile = %mobile, "Attempting PIN login");

        let response = self
            .http_client
            .post(&login_url)
            .header("Content-Type", "application/json")
            .json(&serde_json::json!({
                "mobile": mobile,
                "pin": pin,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Login failed");
            return Err(AuthError::InvalidCredentials(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let envelope: LoginResponse = response.json().await?;
        if !envelope.is_success() {
            let message = envelope.failure_message();
            warn!(message = %message, "Backend rejected login");
            return Err(AuthError::InvalidCredentials(message));
        }

        // is_success guarantees data is present
        let data = envelope
            .data
            .ok_or_else(|| AuthError::MalformedResponse("missing data payload".to_string()))?;

        let profile: UserProfile = serde_json::from_value(data.user)
            .map_err(|e| AuthError::MalformedResponse(format!("user payload: {}", e)))?;

        let role = profile.role_id.and_then(role_routes::RoleId::from_id);
        if role.is_none() {
            debug!(role_id = ?profile.role_id, "Unrecognized role id in login response");
        }

        let session = Session {
            token: Some(data.token),
            user_id: Some(profile.id.to_string()),
            role,
            user: Some(profile),
        };

        self.store.save(&session)?;

        // Single-dashboard policy: every authenticated role (including an
        // unrecognized one) lands on the shared dashboard.
        let destination = role.map(destination_for).unwrap_or(Route::FarmerDashboard);

        info!(user_id = ?session.user_id, destination = ?destination, "Login successful");

        Ok(LoginOutcome {
            session,
            destination,
        })
    }

    /// Log out by clearing all persisted session state. Idempotent.
    pub fn logout(&self) -> AuthResult<()> {
        self.store.clear()?;
        info!("Logged out");
        Ok(())
    }

    /// Current authentication status from a fresh storage snapshot.
    pub fn status(&self) -> AuthStatus {
        let session = self.store.load();
        match (session.is_usable(), session.user_id) {
            (true, Some(user_id)) => AuthStatus::LoggedIn { user_id },
            _ => AuthStatus::NotLoggedIn,
        }
    }
}
