//! Data models
//!
//! Wire shapes of the two REST collections the panels manage.
//! All IDs are `i64`, assigned by the backend.

pub mod employee;
pub mod user;

// Re-exports
pub use employee::*;
pub use user::*;

use crate::types::EntityId;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A record managed through a REST collection
///
/// `Create` is the request body for `POST` (no id); `PUT` sends the same
/// body with the id merged in.
pub trait Entity:
    Clone + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Create/update payload
    type Create: Clone + std::fmt::Debug + Serialize + Send + Sync + 'static;

    /// Collection path segment, e.g. `empleados`
    const COLLECTION: &'static str;

    /// Auxiliary lookup under the collection, e.g. `cargos`
    const AUX_COLLECTION: Option<&'static str> = None;

    /// Singular label for messages
    const LABEL: &'static str;

    fn id(&self) -> EntityId;

    fn display_name(&self) -> &str;

    /// Text fields the search box matches against
    fn search_fields(&self) -> Vec<&str>;

    /// Value compared against the category filter
    fn category(&self) -> Option<&str> {
        None
    }
}
