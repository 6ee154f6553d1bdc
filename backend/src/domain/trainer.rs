//! Trainer: coaching staff attached to a facility.

use chrono::{DateTime, Utc};

use crate::domain::Role;
use crate::domain::validation::{Email, ValidationErrors, validate_email, validate_name};

/// A persisted trainer record.
#[derive(Debug, Clone, PartialEq)]
pub struct Trainer {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub employment_date: DateTime<Utc>,
    pub owner_id: Option<i32>,
    pub manager_id: Option<i32>,
    pub facility_id: Option<i32>,
}

/// Validated input for creating a trainer.
#[derive(Debug, Clone)]
pub struct TrainerDraft {
    pub name: String,
    pub email: Option<Email>,
    pub bio: Option<String>,
    pub role: Role,
    /// Defaults to the insert timestamp when absent.
    pub employment_date: Option<DateTime<Utc>>,
    pub owner_id: Option<i32>,
    pub manager_id: Option<i32>,
    pub facility_id: Option<i32>,
}

/// Raw, unvalidated trainer create fields.
#[derive(Debug, Clone, Default)]
pub struct TrainerDraftInput {
    pub name: String,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub role: Option<Role>,
    pub employment_date: Option<DateTime<Utc>>,
    pub owner_id: Option<i32>,
    pub manager_id: Option<i32>,
    pub facility_id: Option<i32>,
}

impl TrainerDraft {
    /// Validate raw create input, collecting every field failure.
    pub fn parse(input: TrainerDraftInput) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = errors.capture(validate_name(&input.name));
        let email = match input.email.as_deref() {
            Some(raw) => errors.capture(validate_email(raw)).map(Some),
            None => Some(None),
        };

        match (name, email) {
            (Some(name), Some(email)) => Ok(Self {
                name,
                email,
                bio: input.bio,
                role: input.role.unwrap_or(Role::Trainer),
                employment_date: input.employment_date,
                owner_id: input.owner_id,
                manager_id: input.manager_id,
                facility_id: input.facility_id,
            }),
            _ => Err(errors),
        }
    }
}

/// Validated partial update for a trainer.
///
/// Nullable fields are doubly optional: the outer level distinguishes an
/// absent field (untouched) from a supplied one, the inner level a value
/// from an explicit null (cleared).
#[derive(Debug, Clone, Default)]
pub struct TrainerPatch {
    pub name: Option<String>,
    pub email: Option<Option<Email>>,
    pub bio: Option<Option<String>>,
    pub role: Option<Role>,
    pub employment_date: Option<DateTime<Utc>>,
    pub owner_id: Option<Option<i32>>,
    pub manager_id: Option<Option<i32>>,
    pub facility_id: Option<Option<i32>>,
}

/// Raw, unvalidated trainer patch fields.
#[derive(Debug, Clone, Default)]
pub struct TrainerPatchInput {
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub bio: Option<Option<String>>,
    pub role: Option<Role>,
    pub employment_date: Option<DateTime<Utc>>,
    pub owner_id: Option<Option<i32>>,
    pub manager_id: Option<Option<i32>>,
    pub facility_id: Option<Option<i32>>,
}

impl TrainerPatch {
    /// Validate the supplied fields of a patch request.
    pub fn parse(input: TrainerPatchInput) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = input
            .name
            .as_deref()
            .map(|raw| errors.capture(validate_name(raw)));
        let email = match input.email {
            None => None,
            Some(None) => Some(Some(None)),
            Some(Some(raw)) => Some(errors.capture(validate_email(&raw)).map(Some)),
        };

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

    #[rstest]
    fn draft_accepts_missing_email() {
        let draft = TrainerDraft::parse(TrainerDraftInput {
            name: "jane doe".into(),
            ..TrainerDraftInput::default()
        })
        .expect("valid draft");

        assert_eq!(draft.email, None);
        assert_eq!(draft.role, Role::Trainer);
    }

    #[rstest]
    fn draft_validates_supplied_email() {
        let errors = TrainerDraft::parse(TrainerDraftInput {
            name: "jane doe".into(),
            email: Some("not-an-email".into()),
            ..TrainerDraftInput::default()
        })
        .expect_err("invalid email");

        assert_eq!(errors.errors()[0].field, "email");
    }

    #[rstest]
    fn patch_keeps_explicit_null_email_distinct() {
        let cleared = TrainerPatch::parse(TrainerPatchInput {
            email: Some(None),
            ..TrainerPatchInput::default()
        })
        .expect("valid patch");

        assert_eq!(cleared.email, Some(None));
        assert!(!cleared.is_empty());
    }
}
