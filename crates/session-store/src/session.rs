//! The persisted session and its load/save/clear/require operations.

use crate::{KeyValueStorage, StorageKeys, StorageResult};
use role_routes::RoleId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Persisted user profile payload.
///
/// Only the fields the client core reads are typed; everything else the
/// backend sends rides along in `extra` and survives a save/load cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend user id
    pub id: i64,
    /// Backend role id
    #[serde(default)]
    pub role_id: Option<i64>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Tamil twin of the display name
    #[serde(default)]
    pub name_tamil: Option<String>,
    /// Mobile number
    #[serde(default)]
    pub mobile: Option<String>,
    /// Remaining backend fields, preserved verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// The authenticated identity persisted on-device between launches.
///
/// `token` and `user` are set together by login and cleared together by
/// logout; any field may be absent, and absence means "logged out".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub role: Option<RoleId>,
    pub user: Option<UserProfile>,
}

impl Session {
    /// Whether this snapshot can gate a protected screen.
    pub fn is_usable(&self) -> bool {
        self.token.is_some() && self.user_id.is_some()
    }
}

/// Outcome of the protected-screen session guard.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionGuard {
    /// A usable session; the screen may proceed.
    Active(Session),
    /// No usable session; the caller must navigate to login.
    RedirectToLogin,
}

/// Load/save/clear operations over the persisted session keys.
///
/// Callers always take a fresh snapshot with [`SessionStore::load`];
/// nothing here caches across calls.
pub struct SessionStore {
    storage: Box<dyn KeyValueStorage>,
}

impl SessionStore {
    /// Create a session store over the given storage backend.
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Read the current session snapshot.
    ///
    /// Never fails: a storage read error for any key is treated as that
    /// key being absent, so storage unavailability degrades to "logged
    /// out" rather than a crash.
    pub fn load(&self) -> Session {
        Session {
            token: self.read_key(StorageKeys::AUTH_TOKEN),
            user_id: self.read_key(StorageKeys::USER_ID),
            role: self
                .read_key(StorageKeys::USER_ROLE)
                .and_then(|raw| raw.parse::<i64>().ok())
                .and_then(RoleId::from_id),
            user: self.read_key(StorageKeys::USER_DATA).and_then(|raw| {
                match serde_json::from_str::<UserProfile>(&raw) {
                    Ok(profile) => Some(profile),
                    Err(e) => {
                        warn!(error = %e, "Stored user profile unparsable, treating as absent");
                        None
                    }
                }
            }),
        }
    }

    /// Persist a session.
    ///
    /// Writes all four keys; a `Some` field is written, a `None` field is
    /// deleted. The first failing write aborts and surfaces the error —
    /// callers must not treat partially written state as success.
    pub fn save(&self, session: &Session) -> StorageResult<()> {
        self.write_key(StorageKeys::AUTH_TOKEN, session.token.as_deref())?;
        self.write_key(StorageKeys::USER_ID, session.user_id.as_deref())?;

        let role = session.role.map(|r| r.id().to_string());
        self.write_key(StorageKeys::USER_ROLE, role.as_deref())?;

        match &session.user {
            Some(profile) => {
                let raw = serde_json::to_string(profile)
                    .map_err(|e| crate::StorageError::Encoding(e.to_string()))?;
                self.storage.set(StorageKeys::USER_DATA, &raw)?;
            }
            None => {
                self.storage.delete(StorageKeys::USER_DATA)?;
            }
        }

        debug!(user_id = ?session.user_id, "Session saved");
        Ok(())
    }

    /// Remove all persisted session keys. Idempotent.
    pub fn clear(&self) -> StorageResult<()> {
        for key in [
            StorageKeys::AUTH_TOKEN,
            StorageKeys::USER_ID,
            StorageKeys::USER_ROLE,
            StorageKeys::USER_DATA,
            StorageKeys::PROFILE_IMAGES,
        ] {
            self.storage.delete(key)?;
        }
        info!("Session cleared");
        Ok(())
    }

    /// Guard for the top of every protected screen.
    ///
    /// Returns [`SessionGuard::Active`] when a token and user id are both
    /// present. Otherwise clears whatever partial state remains
    /// (best-effort) and signals a redirect to login.
    pub fn require_session(&self) -> SessionGuard {
        let session = self.load();
        if session.is_usable() {
            return SessionGuard::Active(session);
        }

        debug!("No usable session, redirecting to login");
        if let Err(e) = self.clear() {
            warn!(error = %e, "Failed to clear partial session state");
        }
        SessionGuard::RedirectToLogin
    }

    /// Persist the profile image URL list.
    pub fn set_profile_images(&self, images: &[String]) -> StorageResult<()> {
        let raw = serde_json::to_string(images)
            .map_err(|e| crate::StorageError::Encoding(e.to_string()))?;
        self.storage.set(StorageKeys::PROFILE_IMAGES, &raw)
    }

    /// Read the profile image URL list. Absent or unparsable means empty.
    pub fn get_profile_images(&self) -> Vec<String> {
        self.read_key(StorageKeys::PROFILE_IMAGES)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                debug!(key = %key, error = %e, "Storage read failed, treating key as absent");
                None
            }
        }
    }

    fn write_key(&self, key: &str, value: Option<&str>) -> StorageResult<()> {
        match value {
            Some(value) => self.storage.set(key, value),
            None => self.storage.delete(key).map(|_| ()),
        }
    }
}
