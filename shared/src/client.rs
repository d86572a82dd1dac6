//! Client-related types for the auth endpoints
//!
//! Request/response types exchanged with `/auth/login` and `/auth/users`.

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
///
/// The backend identifies a user by email and display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub name: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub user: Option<UserInfo>,
    #[serde(default)]
    pub message: Option<String>,
}

/// User information returned by a successful login
///
/// Treated as opaque: fields the client does not know about are kept in
/// `extra` and written back unchanged when the session is persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserInfo {
    /// Name shown in the panel header: `name`, falling back to `username`
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or_default()
    }

    /// Role shown in the panel header
    pub fn display_role(&self) -> &str {
        self.role.as_deref().unwrap_or("User")
    }
}

/// Entry of the demo credential list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableUser {
    pub email: String,
    pub name: String,
}
