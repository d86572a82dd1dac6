//! User Model

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::types::EntityId;

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
}

/// Create user payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Serialized as `null` when absent
    pub address: Option<String>,
}

impl Entity for User {
    type Create = UserCreate;

    const COLLECTION: &'static str = "users";
    const LABEL: &'static str = "user";

    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str(), self.phone.as_str()];
        if let Some(address) = &self.address {
            fields.push(address);
        }
        fields
    }
}
