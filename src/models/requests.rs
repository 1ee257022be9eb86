//! Request DTOs for the employee API
//!
//! Defines the structure of incoming HTTP request bodies and their validation.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::models::{normalize_email, Employee, NewEmployee, Role};

// == Field Limits ==
pub const MIN_FIELD_LENGTH: usize = 3;
pub const MAX_FIELD_LENGTH: usize = 120;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("email pattern is valid")
});

/// Request body for POST /employees
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl CreateEmployeeRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_name(&self.name).or_else(|| validate_email(&self.email))
    }

    /// Converts the request into a normalized create intent.
    pub fn into_new_employee(self) -> NewEmployee {
        NewEmployee::new(&self.name, &self.email, self.role)
    }
}

/// Request body for PUT /employees/{id}
///
/// Absent fields leave the stored value untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl UpdateEmployeeRequest {
    /// Validates the request against the identifier taken from the path.
    pub fn validate(&self, path_id: i64) -> Option<String> {
        if self.id != path_id {
            return Some(format!(
                "Body id {} does not match path id {}",
                self.id, path_id
            ));
        }
        self.name
            .as_deref()
            .and_then(validate_name)
            .or_else(|| self.email.as_deref().and_then(validate_email))
    }

    /// Applies the provided fields to an existing record.
    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(name) = &self.name {
            employee.name = name.trim().to_string();
        }
        if let Some(email) = &self.email {
            employee.email = normalize_email(email);
        }
        if let Some(role) = self.role {
            employee.role = role;
        }
    }
}

fn validate_length(field: &str, value: &str) -> Option<String> {
    let len = value.trim().chars().count();
    if !(MIN_FIELD_LENGTH..=MAX_FIELD_LENGTH).contains(&len) {
        return Some(format!(
            "{} must be between {} and {} characters",
            field, MIN_FIELD_LENGTH, MAX_FIELD_LENGTH
        ));
    }
    None
}

fn validate_name(name: &str) -> Option<String> {
    validate_length("Name", name)
}

fn validate_email(email: &str) -> Option<String> {
    validate_length("Email", email).or_else(|| {
        if EMAIL_PATTERN.is_match(email.trim()) {
            None
        } else {
            Some("Email must be a valid email address".to_string())
        }
    })
}
