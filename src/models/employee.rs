//! Employee domain model
//!
//! The record persisted by the repository and served through the cache.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Role ==
/// Closed set of employee roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Engineer,
    Manager,
    Designer,
    Analyst,
    HumanResources,
    Sales,
    Support,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 7] = [
        Role::Engineer,
        Role::Manager,
        Role::Designer,
        Role::Analyst,
        Role::HumanResources,
        Role::Sales,
        Role::Support,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Engineer => "Engineer",
            Role::Manager => "Manager",
            Role::Designer => "Designer",
            Role::Analyst => "Analyst",
            Role::HumanResources => "HumanResources",
            Role::Sales => "Sales",
            Role::Support => "Support",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("unknown role '{}'", s))
    }
}

// == Employee ==
/// A persisted employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Store-assigned identifier, immutable once assigned
    pub id: i64,
    pub name: String,
    /// Always trimmed and lower-cased
    pub email: String,
    pub role: Role,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

// == New Employee ==
/// A validated create intent, normalized and ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl NewEmployee {
    /// Builds a create intent, trimming the name and normalizing the email.
    pub fn new(name: &str, email: &str, role: Role) -> Self {
        Self {
            name: name.trim().to_string(),
            email: normalize_email(email),
            role,
        }
    }
}

/// Trims and lower-cases an email address for storage.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
