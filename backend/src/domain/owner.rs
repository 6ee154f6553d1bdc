//! Owner: the root of the ownership hierarchy.

use chrono::{DateTime, Utc};

use crate::domain::Role;
use crate::domain::validation::{Email, ValidationErrors, validate_email, validate_name};

/// A persisted owner record.
#[derive(Debug, Clone, PartialEq)]
pub struct Owner {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating an owner.
#[derive(Debug, Clone)]
pub struct OwnerDraft {
    pub name: String,
    pub email: Email,
    pub role: Role,
}

impl OwnerDraft {
    /// Validate raw create input, collecting every field failure.
    pub fn parse(name: &str, email: &str, role: Option<Role>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = errors.capture(validate_name(name));
        let email = errors.capture(validate_email(email));

        match (name, email) {
            (Some(name), Some(email)) => Ok(Self {
                name,
                email,
                role: role.unwrap_or(Role::Owner),
            }),
            _ => Err(errors),
        }
    }
}

/// Validated partial update for an owner.
#[derive(Debug, Clone, Default)]
pub struct OwnerPatch {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub role: Option<Role>,
}

impl OwnerPatch {
    /// Validate the supplied fields of a patch request.
    pub fn parse(
        name: Option<&str>,
        email: Option<&str>,
        role: Option<Role>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = name.map(|raw| errors.capture(validate_name(raw)));
        let email = email.map(|raw| errors.capture(validate_email(raw)));

        if errors.is_empty() {
            Ok(Self {
                name: name.flatten(),
                email: email.flatten(),
                role,
            })
        } else {
            Err(errors)
        }
    }

    /// Whether the patch supplies any field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none()
    }
}
