//! Facility: a gym location owned by an owner, optionally run by a manager.

use chrono::{DateTime, Utc};

use crate::domain::address::{Address, AddressInput, AddressPatch};
use crate::domain::validation::{ValidationErrors, validate_name};

/// A persisted facility record.
#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    pub id: i32,
    pub name: String,
    pub address: Address,
    pub owner_id: i32,
    pub manager_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating a facility.
#[derive(Debug, Clone)]
pub struct FacilityDraft {
    pub name: String,
    pub address: Address,
    pub owner_id: i32,
    pub manager_id: Option<i32>,
}

impl FacilityDraft {
    /// Validate raw create input, collecting every field failure.
    pub fn parse(
        name: &str,
        address: AddressInput,
        owner_id: i32,
        manager_id: Option<i32>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = errors.capture(validate_name(name));
        let address = match Address::parse(address) {
            Ok(address) => Some(address),
            Err(address_errors) => {
                errors.extend(address_errors);
                None
            }
        };

        match (name, address) {
            (Some(name), Some(address)) => Ok(Self {
                name,
                address,
                owner_id,
                manager_id,
            }),
            _ => Err(errors),
        }
    }
}

/// Validated partial update for a facility.
///
/// Address fields patch individually; state/abbreviation consistency is
/// re-checked against the stored record when the patch is applied.
#[derive(Debug, Clone, Default)]
pub struct FacilityPatch {
    pub name: Option<String>,
    pub address: AddressPatch,
    pub owner_id: Option<i32>,
    pub manager_id: Option<Option<i32>>,
}

/// A patch resolved against the stored record: address fields are merged
/// and re-validated, ready for the gateway to apply.
#[derive(Debug, Clone, Default)]
pub struct FacilityUpdate {
    pub name: Option<String>,
    pub address: Option<Address>,
    pub owner_id: Option<i32>,
    pub manager_id: Option<Option<i32>>,
}

impl FacilityUpdate {
    /// Whether the update applies any field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.owner_id.is_none()
            && self.manager_id.is_none()
    }
}

impl FacilityPatch {
    /// Merge the patch over the stored record, re-validating the address
    /// when any of its fields changed.
    pub fn resolve(self, current: &Facility) -> Result<FacilityUpdate, ValidationErrors> {
        let address = if self.address.is_empty() {
            None
        } else {
            Some(current.address.patched(&self.address)?)
        };
        Ok(FacilityUpdate {
            name: self.name,
            address,
            owner_id: self.owner_id,
            manager_id: self.manager_id,
        })
    }

    /// Validate the supplied fields of a patch request. Cross-field state
    /// consistency is deferred to [`Address::patched`].
    pub fn parse(
        name: Option<&str>,
        address: AddressPatch,
        owner_id: Option<i32>,
        manager_id: Option<Option<i32>>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = name.map(|raw| errors.capture(validate_name(raw)));

        if errors.is_empty() {
            Ok(Self {
                name: name.flatten(),
                address,
                owner_id,
                manager_id,
            })
        } else {
            Err(errors)
        }
    }

    /// Whether the patch supplies any field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_empty()
            && self.owner_id.is_none()
            && self.manager_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn address_input() -> AddressInput {
        AddressInput {
            street: "500 Capitol Mall".into(),
            city: "Sacramento".into(),
            state: "CALIFORNIA".into(),
            state_abbr: None,
            zip_code: "95814".into(),
        }
    }

    #[rstest]
    fn draft_titles_name_and_derives_abbreviation() {
        let draft =
            FacilityDraft::parse("iron temple", address_input(), 1, None).expect("valid draft");

        assert_eq!(draft.name, "Iron Temple");
        assert_eq!(draft.address.state_abbr, "CA");
    }

    #[rstest]
    fn draft_collects_name_and_address_failures() {
        let mut address = address_input();
        address.zip_code = "12".into();

        let errors = FacilityDraft::parse("x", address, 1, None).expect_err("invalid");

        let fields: Vec<_> = errors.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "zip_code"]);
    }

    #[rstest]
    fn empty_patch_is_reported_empty() {
        let patch =
            FacilityPatch::parse(None, AddressPatch::default(), None, None).expect("valid");

        assert!(patch.is_empty());
    }
}
