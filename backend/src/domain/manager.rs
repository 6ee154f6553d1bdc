//! Manager: optional intermediary between an owner and their facilities.

use chrono::{DateTime, Utc};

use crate::domain::Role;
use crate::domain::validation::{Email, ValidationErrors, validate_email, validate_name};

/// A persisted manager record.
#[derive(Debug, Clone, PartialEq)]
pub struct Manager {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub owner_id: Option<i32>,
}

/// Validated input for creating a manager.
#[derive(Debug, Clone)]
pub struct ManagerDraft {
    pub name: String,
    pub email: Email,
    pub role: Role,
    pub owner_id: Option<i32>,
}

impl ManagerDraft {
    /// Validate raw create input, collecting every field failure.
    pub fn parse(
        name: &str,
        email: &str,
        role: Option<Role>,
        owner_id: Option<i32>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = errors.capture(validate_name(name));
        let email = errors.capture(validate_email(email));

        match (name, email) {
            (Some(name), Some(email)) => Ok(Self {
                name,
                email,
                role: role.unwrap_or(Role::Manager),
                owner_id,
            }),
            _ => Err(errors),
        }
    }
}

/// Validated partial update for a manager.
///
/// `owner_id` distinguishes an absent field (untouched) from an explicit
/// null (detach from the owner).
#[derive(Debug, Clone, Default)]
pub struct ManagerPatch {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub role: Option<Role>,
    pub owner_id: Option<Option<i32>>,
}

impl ManagerPatch {
    /// Validate the supplied fields of a patch request.
    pub fn parse(
        name: Option<&str>,
        email: Option<&str>,
        role: Option<Role>,
        owner_id: Option<Option<i32>>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = name.map(|raw| errors.capture(validate_name(raw)));
        let email = email.map(|raw| errors.capture(validate_email(raw)));

        if errors.is_empty() {
            Ok(Self {
                name: name.flatten(),
                email: email.flatten(),
                role,
                owner_id,
            })
        } else {
            Err(errors)
        }
    }

    /// Whether the patch supplies any field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.role.is_none()
            && self.owner_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn draft_defaults_to_manager_role() {
        let draft =
            ManagerDraft::parse("grace hopper", "grace@example.com", None, Some(1)).expect("valid");

        assert_eq!(draft.role, Role::Manager);
        assert_eq!(draft.owner_id, Some(1));
    }

    #[rstest]
    fn patch_distinguishes_absent_from_null_owner() {
        let untouched = ManagerPatch::parse(None, None, None, None).expect("valid");
        let detached = ManagerPatch::parse(None, None, None, Some(None)).expect("valid");

        assert_eq!(untouched.owner_id, None);
        assert_eq!(detached.owner_id, Some(None));
        assert!(untouched.is_empty());
        assert!(!detached.is_empty());
    }
}
