//! Staff: front-desk and support personnel attached to a facility.

use chrono::{DateTime, Utc};

use crate::domain::Role;
use crate::domain::validation::{Email, ValidationErrors, validate_email, validate_name};

/// A persisted staff record.
#[derive(Debug, Clone, PartialEq)]
pub struct Staff {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub employment_date: DateTime<Utc>,
    pub owner_id: Option<i32>,
    pub manager_id: Option<i32>,
    pub facility_id: i32,
}

/// Validated input for creating a staff member.
#[derive(Debug, Clone)]
pub struct StaffDraft {
    pub name: String,
    pub email: Email,
    pub bio: Option<String>,
    pub role: Role,
    /// Defaults to the insert timestamp when absent.
    pub employment_date: Option<DateTime<Utc>>,
    pub owner_id: Option<i32>,
    pub manager_id: Option<i32>,
    pub facility_id: i32,
}

/// Raw, unvalidated staff create fields.
#[derive(Debug, Clone)]
pub struct StaffDraftInput {
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub role: Option<Role>,
    pub employment_date: Option<DateTime<Utc>>,
    pub owner_id: Option<i32>,
    pub manager_id: Option<i32>,
    pub facility_id: i32,
}

impl StaffDraft {
    /// Validate raw create input, collecting every field failure.
    pub fn parse(input: StaffDraftInput) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = errors.capture(validate_name(&input.name));
        let email = errors.capture(validate_email(&input.email));

        match (name, email) {
            (Some(name), Some(email)) => Ok(Self {
                name,
                email,
                bio: input.bio,
                role: input.role.unwrap_or(Role::Staff),
                employment_date: input.employment_date,
                owner_id: input.owner_id,
                manager_id: input.manager_id,
                facility_id: input.facility_id,
            }),
            _ => Err(errors),
        }
    }
}

/// Validated partial update for a staff member.
#[derive(Debug, Clone, Default)]
pub struct StaffPatch {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub bio: Option<Option<String>>,
    pub role: Option<Role>,
    pub employment_date: Option<DateTime<Utc>>,
    pub owner_id: Option<Option<i32>>,
    pub manager_id: Option<Option<i32>>,
    pub facility_id: Option<i32>,
}

/// Raw, unvalidated staff patch fields.
#[derive(Debug, Clone, Default)]
pub struct StaffPatchInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<Option<String>>,
    pub role: Option<Role>,
    pub employment_date: Option<DateTime<Utc>>,
    pub owner_id: Option<Option<i32>>,
    pub manager_id: Option<Option<i32>>,
    pub facility_id: Option<i32>,
}

impl StaffPatch {
    /// Validate the supplied fields of a patch request.
    pub fn parse(input: StaffPatchInput) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = input
            .name
            .as_deref()
            .map(|raw| errors.capture(validate_name(raw)));
        let email = input
            .email
            .as_deref()
            .map(|raw| errors.capture(validate_email(raw)));

        if errors.is_empty() {
            Ok(Self {
                name: name.flatten(),
                email: email.flatten(),
                bio: input.bio,
                role: input.role,
                employment_date: input.employment_date,
                owner_id: input.owner_id,
                manager_id: input.manager_id,
                facility_id: input.facility_id,
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
            && self.bio.is_none()
            && self.role.is_none()
            && self.employment_date.is_none()
            && self.owner_id.is_none()
            && self.manager_id.is_none()
            && self.facility_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft_input() -> StaffDraftInput {
        StaffDraftInput {
            name: "sam porter".into(),
            email: "Sam@Example.com".into(),
            bio: None,
            role: None,
            employment_date: None,
            owner_id: None,
            manager_id: None,
            facility_id: 1,
        }
    }

    #[rstest]
    fn draft_defaults_to_staff_role() {
        let draft = StaffDraft::parse(draft_input()).expect("valid draft");

        assert_eq!(draft.role, Role::Staff);
        assert_eq!(draft.email.as_str(), "sam@example.com");
    }

    #[rstest]
    fn patch_clears_bio_with_explicit_null() {
        let patch = StaffPatch::parse(StaffPatchInput {
            bio: Some(None),
            ..StaffPatchInput::default()
        })
        .expect("valid patch");

        assert_eq!(patch.bio, Some(None));
        assert!(!patch.is_empty());
    }
}
