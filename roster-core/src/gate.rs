//! AuthGate - entry check for protected views

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::client::UserInfo;
use shared::types::SystemId;

use crate::error::StorageResult;
use crate::session::SessionStore;

/// What the header shows for the logged-in user
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderInfo {
    pub display_name: String,
    pub role: String,
    pub user: UserInfo,
}

impl HeaderInfo {
    pub fn from_user(user: UserInfo) -> Self {
        Self {
            display_name: user.display_name().to_string(),
            role: user.display_role().to_string(),
            user,
        }
    }
}

/// Gate verdict
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    Proceed(HeaderInfo),
    /// Render nothing; go to the login view
    RedirectToLogin,
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Proceed(_))
    }
}

/// Fail-closed gate bound to one system
#[derive(Debug, Clone)]
pub struct AuthGate {
    store: Arc<SessionStore>,
    expected: SystemId,
}

impl AuthGate {
    pub fn new(store: Arc<SessionStore>, expected: SystemId) -> Self {
        Self { store, expected }
    }

    pub fn expected(&self) -> SystemId {
        self.expected
    }

    pub fn check(&self) -> StorageResult<GateDecision> {
        self.check_at(Utc::now())
    }

    /// Decide at `now`
    ///
    /// An expired record is removed. A record for another system is left in
    /// place so that system's own gate can still use it.
    pub fn check_at(&self, now: DateTime<Utc>) -> StorageResult<GateDecision> {
        let Some(record) = self.store.load()? else {
            tracing::info!(system = %self.expected, "No session, redirecting to login");
            return Ok(GateDecision::RedirectToLogin);
        };

        if record.is_expired_at(now) {
            tracing::info!(expired_at = %record.expiry_time, "Session expired");
            self.store.clear()?;
            return Ok(GateDecision::RedirectToLogin);
        }

        if record.system != self.expected.as_str() {
            tracing::warn!(
                stored = %record.system,
                expected = %self.expected,
                "Session belongs to another system"
            );
            return Ok(GateDecision::RedirectToLogin);
        }

        match self.store.current_user()? {
            Some(user) => Ok(GateDecision::Proceed(HeaderInfo::from_user(user))),
            None => {
                tracing::info!("No current user in this session scope");
                Ok(GateDecision::RedirectToLogin)
            }
        }
    }
}
