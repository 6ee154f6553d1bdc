//! Embedded facility address and its cross-field state validation.

use crate::domain::states;
use crate::domain::validation::{FieldError, ValidationErrors, validate_zip_code};

/// A validated facility address. Stored flat on the facility row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub city: String,
    /// Full state name, upper-cased, from the canonical table.
    pub state: String,
    /// Two-letter abbreviation corresponding to `state`.
    pub state_abbr: String,
    pub zip_code: String,
}

/// Raw address fields as supplied on create.
#[derive(Debug, Clone)]
pub struct AddressInput {
    pub street: String,
    pub city: String,
    pub state: String,
    /// Derived from `state` when omitted.
    pub state_abbr: Option<String>,
    pub zip_code: String,
}

/// Raw address fields as supplied on patch. Absent fields keep the
/// current value.
#[derive(Debug, Clone, Default)]
pub struct AddressPatch {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub state_abbr: Option<String>,
    pub zip_code: Option<String>,
}

impl AddressPatch {
    /// Whether the patch supplies any field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.street.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.state_abbr.is_none()
            && self.zip_code.is_none()
    }
}

impl Address {
    /// Validate raw create input: structural checks (zip format) first,
    /// then state/abbreviation consistency.
    pub fn parse(input: AddressInput) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let zip_code = errors.capture(validate_zip_code(&input.zip_code));
        let pair = errors.capture(validate_state_pair(
            &input.state,
            input.state_abbr.as_deref(),
        ));

        match (zip_code, pair) {
            (Some(zip_code), Some((state, state_abbr))) => Ok(Self {
                street: input.street,
                city: input.city,
                state,
                state_abbr,
                zip_code,
            }),
            _ => Err(errors),
        }
    }

    /// Merge a patch over this address and re-validate the result.
    ///
    /// When the patch changes `state` without supplying `state_abbr`, the
    /// abbreviation is re-derived from the canonical table. A patched
    /// abbreviation must correspond to the effective state.
    pub fn patched(&self, patch: &AddressPatch) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let zip_code = match &patch.zip_code {
            Some(raw) => errors.capture(validate_zip_code(raw)),
            None => Some(self.zip_code.clone()),
        };

        let pair = match (&patch.state, &patch.state_abbr) {
            (None, None) => Some((self.state.clone(), self.state_abbr.clone())),
            (Some(state), abbr) => {
                errors.capture(validate_state_pair(state, abbr.as_deref()))
            }
            (None, Some(abbr)) => {
                errors.capture(validate_state_pair(&self.state, Some(abbr.as_str())))
            }
        };

        match (zip_code, pair) {
            (Some(zip_code), Some((state, state_abbr))) => Ok(Self {
                street: patch.street.clone().unwrap_or_else(|| self.street.clone()),
                city: patch.city.clone().unwrap_or_else(|| self.city.clone()),
                state,
                state_abbr,
                zip_code,
            }),
            _ => Err(errors),
        }
    }
}

/// Check a state name against the canonical table and reconcile it with
/// the abbreviation, deriving the abbreviation when it is absent.
fn validate_state_pair(
    state: &str,
    state_abbr: Option<&str>,
) -> Result<(String, String), FieldError> {
    let Some(canonical_abbr) = states::abbreviation_for(state) else {
        return Err(FieldError::new("state", "is not a recognised U.S. state"));
    };
    match state_abbr {
        None => Ok((state.to_owned(), canonical_abbr.to_owned())),
        Some(abbr) => {
            if states::full_name_for(abbr).is_none() {
                return Err(FieldError::new(
                    "state_abbr",
                    "is not a recognised U.S. state abbreviation",
                ));
            }
            if abbr != canonical_abbr {
                return Err(FieldError::new(
                    "state_abbr",
                    "does not correspond to the supplied state",
                ));
            }
            Ok((state.to_owned(), abbr.to_owned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn input(state: &str, abbr: Option<&str>, zip: &str) -> AddressInput {
        AddressInput {
            street: "12 Main Street".into(),
            city: "Sacramento".into(),
            state: state.into(),
            state_abbr: abbr.map(Into::into),
            zip_code: zip.into(),
        }
    }

    #[rstest]
    fn accepts_consistent_state_pair() {
        let address = Address::parse(input("CALIFORNIA", Some("CA"), "94203")).expect("valid");

        assert_eq!(address.state_abbr, "CA");
        assert_eq!(address.zip_code, "94203");
    }

    #[rstest]
    fn derives_abbreviation_when_absent() {
        let address = Address::parse(input("TEXAS", None, "73301")).expect("valid");

        assert_eq!(address.state_abbr, "TX");
    }

    #[rstest]
    fn rejects_unknown_state() {
        let errors = Address::parse(input("ATLANTIS", None, "94203")).expect_err("invalid state");

        assert_eq!(errors.errors()[0].field, "state");
    }

    #[rstest]
    fn rejects_mismatched_pair() {
        let errors =
            Address::parse(input("CALIFORNIA", Some("TX"), "94203")).expect_err("mismatch");

        assert_eq!(errors.errors()[0].field, "state_abbr");
    }

    #[rstest]
    fn collects_zip_and_state_failures_together() {
        let errors = Address::parse(input("ATLANTIS", None, "123")).expect_err("both invalid");

        let fields: Vec<_> = errors.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["zip_code", "state"]);
    }

    #[rstest]
    fn patching_state_alone_rederives_abbreviation() {
        let current = Address::parse(input("CALIFORNIA", None, "94203")).expect("valid");
        let patch = AddressPatch {
            state: Some("TEXAS".into()),
            ..AddressPatch::default()
        };

        let updated = current.patched(&patch).expect("patched");

        assert_eq!(updated.state, "TEXAS");
        assert_eq!(updated.state_abbr, "TX");
        assert_eq!(updated.city, "Sacramento");
    }

    #[rstest]
    fn patching_abbreviation_alone_must_match_current_state() {
        let current = Address::parse(input("CALIFORNIA", None, "94203")).expect("valid");
        let patch = AddressPatch {
            state_abbr: Some("TX".into()),
            ..AddressPatch::default()
        };

        let errors = current.patched(&patch).expect_err("mismatch");

        assert_eq!(errors.errors()[0].field, "state_abbr");
    }

    #[rstest]
    fn empty_patch_keeps_address_unchanged() {
        let current = Address::parse(input("CALIFORNIA", None, "94203")).expect("valid");

        let updated = current.patched(&AddressPatch::default()).expect("patched");

        assert_eq!(updated, current);
    }
}
