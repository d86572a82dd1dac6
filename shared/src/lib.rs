//! Shared types for the Roster panels
//!
//! Wire models for the employees and users REST collections, the auth
//! DTOs exchanged with the login endpoints, and small utility types.
//! These types are shared between roster-client and roster-core.

pub mod client;
pub mod models;
pub mod types;
pub mod util;

// Re-exports
pub use client::{AvailableUser, LoginRequest, LoginResponse, UserInfo};
pub use models::{Employee, EmployeeCreate, Entity, User, UserCreate};
pub use serde::{Deserialize, Serialize};
pub use types::{EntityId, SystemId};
