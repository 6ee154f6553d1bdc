//! Row models mapping between the SQLite schema and domain types.
//!
//! Three shapes per entity: a `*Row` read model, a `New*Row` insertable
//! borrowing from the validated draft, and a `*Changeset` applying a
//! partial update. Nullable columns use `Option<Option<T>>` in changesets
//! so an absent field is skipped while an explicit null clears the column.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use tracing::warn;

use crate::domain::facility::FacilityUpdate;
use crate::domain::validation::Email;
use crate::domain::{
    Facility, Manager, ManagerPatch, Owner, OwnerPatch, Role, Staff, StaffPatch, Trainer,
    TrainerPatch,
};

use super::schema::{facilities, managers, owners, staff, trainers};

/// Parse a stored role value, falling back to the table's own role when
/// the value is unrecognised.
fn parse_role(value: &str, fallback: Role) -> Role {
    value.parse().unwrap_or_else(|_| {
        warn!(value, fallback = %fallback, "unrecognised role value, using fallback");
        fallback
    })
}

// ---------------------------------------------------------------------------
// Owner

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = owners)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OwnerRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: NaiveDateTime,
}

impl OwnerRow {
    /// Convert the row to its domain record.
    pub fn into_domain(self) -> Owner {
        Owner {
            id: self.id,
            role: parse_role(&self.role, Role::Owner),
            name: self.name,
            email: self.email,
            created_at: self.created_at.and_utc(),
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = owners)]
pub struct NewOwnerRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = owners)]
pub struct OwnerChangeset {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl From<&OwnerPatch> for OwnerChangeset {
    fn from(patch: &OwnerPatch) -> Self {
        Self {
            name: patch.name.clone(),
            email: patch.email.clone().map(Email::into_string),
            role: patch.role.map(|role| role.as_str().to_owned()),
        }
    }
}

// ---------------------------------------------------------------------------
// Manager

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = managers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ManagerRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub owner_id: Option<i32>,
}

impl ManagerRow {
    /// Convert the row to its domain record.
    pub fn into_domain(self) -> Manager {
        Manager {
            id: self.id,
            role: parse_role(&self.role, Role::Manager),
            name: self.name,
            email: self.email,
            created_at: self.created_at.and_utc(),
            owner_id: self.owner_id,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = managers)]
pub struct NewManagerRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub created_at: NaiveDateTime,
    pub owner_id: Option<i32>,
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = managers)]
pub struct ManagerChangeset {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub owner_id: Option<Option<i32>>,
}

impl From<&ManagerPatch> for ManagerChangeset {
    fn from(patch: &ManagerPatch) -> Self {
        Self {
            name: patch.name.clone(),
            email: patch.email.clone().map(Email::into_string),
            role: patch.role.map(|role| role.as_str().to_owned()),
            owner_id: patch.owner_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Facility

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = facilities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FacilityRow {
    pub id: i32,
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub state_abbr: String,
    pub zip_code: String,
    pub owner_id: i32,
    pub manager_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

impl FacilityRow {
    /// Convert the row to its domain record, folding the flat address
    /// columns back into the embedded address.
    pub fn into_domain(self) -> Facility {
        Facility {
            id: self.id,
            name: self.name,
            address: crate::domain::Address {
                street: self.street,
                city: self.city,
                state: self.state,
                state_abbr: self.state_abbr,
                zip_code: self.zip_code,
            },
            owner_id: self.owner_id,
            manager_id: self.manager_id,
            created_at: self.created_at.and_utc(),
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = facilities)]
pub struct NewFacilityRow<'a> {
    pub name: &'a str,
    pub street: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub state_abbr: &'a str,
    pub zip_code: &'a str,
    pub owner_id: i32,
    pub manager_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = facilities)]
pub struct FacilityChangeset {
    pub name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub state_abbr: Option<String>,
    pub zip_code: Option<String>,
    pub owner_id: Option<i32>,
    pub manager_id: Option<Option<i32>>,
}

impl From<&FacilityUpdate> for FacilityChangeset {
    fn from(update: &FacilityUpdate) -> Self {
        let address = update.address.as_ref();
        Self {
            name: update.name.clone(),
            street: address.map(|a| a.street.clone()),
            city: address.map(|a| a.city.clone()),
            state: address.map(|a| a.state.clone()),
            state_abbr: address.map(|a| a.state_abbr.clone()),
            zip_code: address.map(|a| a.zip_code.clone()),
            owner_id: update.owner_id,
            manager_id: update.manager_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Trainer

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = trainers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TrainerRow {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub employment_date: NaiveDateTime,
    pub owner_id: Option<i32>,
    pub manager_id: Option<i32>,
    pub facility_id: Option<i32>,
}

impl TrainerRow {
    /// Convert the row to its domain record.
    pub fn into_domain(self) -> Trainer {
        Trainer {
            id: self.id,
            role: parse_role(&self.role, Role::Trainer),
            name: self.name,
            email: self.email,
            bio: self.bio,
            created_at: self.created_at.and_utc(),
            employment_date: self.employment_date.and_utc(),
            owner_id: self.owner_id,
            manager_id: self.manager_id,
            facility_id: self.facility_id,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = trainers)]
pub struct NewTrainerRow<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub role: &'a str,
    pub created_at: NaiveDateTime,
    pub employment_date: NaiveDateTime,
    pub owner_id: Option<i32>,
    pub manager_id: Option<i32>,
    pub facility_id: Option<i32>,
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = trainers)]
pub struct TrainerChangeset {
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub bio: Option<Option<String>>,
    pub role: Option<String>,
    pub employment_date: Option<NaiveDateTime>,
    pub owner_id: Option<Option<i32>>,
    pub manager_id: Option<Option<i32>>,
    pub facility_id: Option<Option<i32>>,
}

impl From<&TrainerPatch> for TrainerChangeset {
    fn from(patch: &TrainerPatch) -> Self {
        Self {
            name: patch.name.clone(),
            email: patch
                .email
                .clone()
                .map(|email| email.map(Email::into_string)),
            bio: patch.bio.clone(),
            role: patch.role.map(|role| role.as_str().to_owned()),
            employment_date: patch.employment_date.map(|date| date.naive_utc()),
            owner_id: patch.owner_id,
            manager_id: patch.manager_id,
            facility_id: patch.facility_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Staff

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = staff)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StaffRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub employment_date: NaiveDateTime,
    pub owner_id: Option<i32>,
    pub manager_id: Option<i32>,
    pub facility_id: i32,
}

impl StaffRow {
    /// Convert the row to its domain record.
    pub fn into_domain(self) -> Staff {
        Staff {
            id: self.id,
            role: parse_role(&self.role, Role::Staff),
            name: self.name,
            email: self.email,
            bio: self.bio,
            created_at: self.created_at.and_utc(),
            employment_date: self.employment_date.and_utc(),
            owner_id: self.owner_id,
            manager_id: self.manager_id,
            facility_id: self.facility_id,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = staff)]
pub struct NewStaffRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub bio: Option<&'a str>,
    pub role: &'a str,
    pub created_at: NaiveDateTime,
    pub employment_date: NaiveDateTime,
    pub owner_id: Option<i32>,
    pub manager_id: Option<i32>,
    pub facility_id: i32,
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = staff)]
pub struct StaffChangeset {
    pub name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<Option<String>>,
    pub role: Option<String>,
    pub employment_date: Option<NaiveDateTime>,
    pub owner_id: Option<Option<i32>>,
    pub manager_id: Option<Option<i32>>,
    pub facility_id: Option<i32>,
}

impl From<&StaffPatch> for StaffChangeset {
    fn from(patch: &StaffPatch) -> Self {
        Self {
            name: patch.name.clone(),
            email: patch.email.clone().map(Email::into_string),
            bio: patch.bio.clone(),
            role: patch.role.map(|role| role.as_str().to_owned()),
            employment_date: patch.employment_date.map(|date| date.naive_utc()),
            owner_id: patch.owner_id,
            manager_id: patch.manager_id,
            facility_id: patch.facility_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn stored_roles_parse_to_domain_roles() {
        assert_eq!(parse_role("Trainer", Role::Staff), Role::Trainer);
    }

    #[rstest]
    fn unrecognised_roles_fall_back() {
        assert_eq!(parse_role("Janitor", Role::Staff), Role::Staff);
    }

    #[rstest]
    fn owner_row_converts_to_domain() {
        let row = OwnerRow {
            id: 7,
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            role: "Owner".into(),
            created_at: chrono::DateTime::from_timestamp(1_700_000_000, 0)
                .expect("valid timestamp")
                .naive_utc(),
        };

        let owner = row.into_domain();

        assert_eq!(owner.id, 7);
        assert_eq!(owner.role, Role::Owner);
        assert_eq!(owner.created_at.timestamp(), 1_700_000_000);
    }

    #[rstest]
    fn facility_update_without_address_skips_address_columns() {
        let update = FacilityUpdate {
            name: Some("Iron Temple".into()),
            ..FacilityUpdate::default()
        };

        let changes = FacilityChangeset::from(&update);

        assert_eq!(changes.name.as_deref(), Some("Iron Temple"));
        assert_eq!(changes.street, None);
        assert_eq!(changes.state_abbr, None);
    }
}
