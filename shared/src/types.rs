//! Common types for the shared crate
//!
//! Utility types used across the workspace

use serde::{Deserialize, Serialize};

/// Entity identifier assigned by the backend
pub type EntityId = i64;

/// Target system picked on the login screen
///
/// Session records store the string form; a session only authorizes the
/// view whose identifier is exactly equal to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemId {
    /// Employees panel, web version
    #[serde(rename = "empleados-web")]
    EmployeesWeb,
    /// Employees application, desktop version
    #[serde(rename = "empleados-desktop")]
    EmployeesDesktop,
    /// Users application, desktop version
    #[serde(rename = "usuarios-desktop")]
    UsersDesktop,
}

impl SystemId {
    /// All systems, in the order the selector shows them
    pub const ALL: [SystemId; 3] = [
        SystemId::EmployeesWeb,
        SystemId::EmployeesDesktop,
        SystemId::UsersDesktop,
    ];

    /// Identifier as persisted in the session record
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemId::EmployeesWeb => "empleados-web",
            SystemId::EmployeesDesktop => "empleados-desktop",
            SystemId::UsersDesktop => "usuarios-desktop",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            SystemId::EmployeesWeb => "Employees (web)",
            SystemId::EmployeesDesktop => "Employees (desktop)",
            SystemId::UsersDesktop => "Users (desktop)",
        }
    }
}

impl std::fmt::Display for SystemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SystemId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SystemId::ALL
            .into_iter()
            .find(|system| system.as_str() == s)
            .ok_or_else(|| format!("Unknown system: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_id_round_trips_through_str() {
        for system in SystemId::ALL {
            assert_eq!(system.as_str().parse::<SystemId>().unwrap(), system);
        }
        assert!("empleados".parse::<SystemId>().is_err());
        assert!("EMPLEADOS-WEB".parse::<SystemId>().is_err());
    }

    #[test]
    fn test_system_id_serializes_as_wire_string() {
        let json = serde_json::to_string(&SystemId::UsersDesktop).unwrap();
        assert_eq!(json, "\"usuarios-desktop\"");
    }
}
