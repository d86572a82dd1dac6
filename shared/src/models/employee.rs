//! Employee Model

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::types::EntityId;

/// Employee entity (field names follow the backend's JSON)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EntityId,
    #[serde(rename = "nombre")]
    pub name: String,
    /// Position / job title, also the category filter value
    #[serde(rename = "cargo")]
    pub position: String,
    #[serde(rename = "salario")]
    pub salary: i64,
    #[serde(rename = "telefono")]
    pub phone: String,
    pub email: String,
}

/// Create employee payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeCreate {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cargo")]
    pub position: String,
    #[serde(rename = "salario")]
    pub salary: i64,
    #[serde(rename = "telefono")]
    pub phone: String,
    pub email: String,
}

impl Entity for Employee {
    type Create = EmployeeCreate;

    const COLLECTION: &'static str = "empleados";
    const AUX_COLLECTION: Option<&'static str> = Some("cargos");
    const LABEL: &'static str = "employee";

    fn id(&self) -> EntityId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }

    fn category(&self) -> Option<&str> {
        Some(&self.position)
    }
}
