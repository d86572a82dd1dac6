//! Roster Client - HTTP client for the panels' REST backend
//!
//! Provides typed calls to the entity collections (`/empleados`, `/users`),
//! the health probe, and the auth endpoints used by the login screen.

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod resource;

pub use auth::{AuthApi, AuthClient, DesktopArtifact};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use resource::{ResourceApi, ResourceClient};

// Re-export shared types for convenience
pub use shared::{AvailableUser, Employee, EmployeeCreate, Entity, LoginResponse, User, UserCreate, UserInfo};
