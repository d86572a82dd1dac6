//! SessionStore - login session persistence
//!
//! One session record under a fixed key in the persistent store, plus the
//! current user in the process-scoped store. The record is proof of an
//! earlier successful login with a fixed validity window; the backend
//! remains the authority on permissions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::client::UserInfo;
use shared::types::SystemId;

use crate::error::StorageResult;
use crate::storage::{KeyValueStore, MemoryStore};

/// Persistent key holding the session record
pub const SESSION_KEY: &str = "employeeSystemSession";

/// Process-scoped key holding the logged-in user
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Stored session
///
/// Replaced wholesale on every login, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub user: UserInfo,
    /// Exact string form of the [`SystemId`] chosen at login
    pub system: String,
    pub login_time: DateTime<Utc>,
    pub expiry_time: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(user: UserInfo, system: SystemId, login_time: DateTime<Utc>) -> Self {
        Self {
            user,
            system: system.as_str().to_string(),
            login_time,
            expiry_time: shared::util::session_expiry(login_time),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiry_time
    }

    /// Whether the record authorizes `expected` at `now`
    pub fn is_valid_at(&self, expected: SystemId, now: DateTime<Utc>) -> bool {
        !self.is_expired_at(now) && self.system == expected.as_str()
    }
}

/// Session persistence over two stores
pub struct SessionStore {
    persistent: Arc<dyn KeyValueStore>,
    process: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(persistent: Arc<dyn KeyValueStore>, process: Arc<dyn KeyValueStore>) -> Self {
        Self { persistent, process }
    }

    /// Both scopes in memory
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()))
    }

    /// Persist a new session starting now
    pub fn save(&self, user: &UserInfo, system: SystemId) -> StorageResult<SessionRecord> {
        self.save_at(user, system, Utc::now())
    }

    pub fn save_at(
        &self,
        user: &UserInfo,
        system: SystemId,
        now: DateTime<Utc>,
    ) -> StorageResult<SessionRecord> {
        let record = SessionRecord::new(user.clone(), system, now);
        self.persistent
            .set(SESSION_KEY, &serde_json::to_string(&record)?)?;
        self.set_current_user(user)?;
        tracing::info!(
            user = %user.display_name(),
            system = %record.system,
            expires = %record.expiry_time,
            "Session stored"
        );
        Ok(record)
    }

    /// Stored session, if any
    ///
    /// A record that no longer parses is reported as absent.
    pub fn load(&self) -> StorageResult<Option<SessionRecord>> {
        let Some(raw) = self.persistent.get(SESSION_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!(error = %e, "Stored session is unreadable, ignoring it");
                Ok(None)
            }
        }
    }

    pub fn is_valid(&self, record: &SessionRecord, expected: SystemId) -> bool {
        record.is_valid_at(expected, Utc::now())
    }

    pub fn current_user(&self) -> StorageResult<Option<UserInfo>> {
        let Some(raw) = self.process.get(CURRENT_USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "Current user entry is unreadable");
                Ok(None)
            }
        }
    }

    pub fn set_current_user(&self, user: &UserInfo) -> StorageResult<()> {
        self.process
            .set(CURRENT_USER_KEY, &serde_json::to_string(user)?)
    }

    /// Remove the session and the current user
    pub fn clear(&self) -> StorageResult<()> {
        self.persistent.remove(SESSION_KEY)?;
        self.process.remove(CURRENT_USER_KEY)?;
        tracing::debug!("Session cleared");
        Ok(())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}
