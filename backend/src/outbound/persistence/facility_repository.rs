//! SQLite-backed gateway for facility records and their expansions.

use chrono::Utc;
use diesel::prelude::*;
use pagination::PageParams;

use crate::domain::facility::FacilityUpdate;
use crate::domain::{Facility, FacilityDraft, Manager, Owner, Staff, Trainer};

use super::error_mapping::{RepositoryError, map_diesel_error, map_pool_error};
use super::models::{
    FacilityChangeset, FacilityRow, ManagerRow, NewFacilityRow, OwnerRow, StaffRow, TrainerRow,
};
use super::pool::{DbConnection, DbPool};
use super::schema::{facilities, managers, owners, staff, trainers};

/// Diesel-backed repository for facilities.
#[derive(Clone)]
pub struct FacilityRepository {
    pool: DbPool,
}

impl FacilityRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a validated draft, returning the stored record.
    pub fn insert(&self, draft: &FacilityDraft) -> Result<Facility, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = NewFacilityRow {
            name: &draft.name,
            street: &draft.address.street,
            city: &draft.address.city,
            state: &draft.address.state,
            state_abbr: &draft.address.state_abbr,
            zip_code: &draft.address.zip_code,
            owner_id: draft.owner_id,
            manager_id: draft.manager_id,
            created_at: Utc::now().naive_utc(),
        };

        diesel::insert_into(facilities::table)
            .values(&row)
            .returning(FacilityRow::as_returning())
            .get_result::<FacilityRow>(&mut conn)
            .map(FacilityRow::into_domain)
            .map_err(map_diesel_error)
    }

    /// Fetch a facility by id.
    pub fn find(&self, id: i32) -> Result<Facility, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        find_row(&mut conn, id).map(FacilityRow::into_domain)
    }

    /// Fetch a facility together with its owner.
    pub fn find_with_owner(&self, id: i32) -> Result<(Facility, Owner), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        facilities::table
            .inner_join(owners::table)
            .filter(facilities::id.eq(id))
            .select((FacilityRow::as_select(), OwnerRow::as_select()))
            .first::<(FacilityRow, OwnerRow)>(&mut conn)
            .optional()
            .map_err(map_diesel_error)?
            .map(|(facility, owner)| (facility.into_domain(), owner.into_domain()))
            .ok_or(RepositoryError::NotFound)
    }

    /// Fetch a facility together with its manager, when one is attached.
    pub fn find_with_manager(&self, id: i32) -> Result<(Facility, Option<Manager>), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        facilities::table
            .left_join(managers::table)
            .filter(facilities::id.eq(id))
            .select((FacilityRow::as_select(), Option::<ManagerRow>::as_select()))
            .first::<(FacilityRow, Option<ManagerRow>)>(&mut conn)
            .optional()
            .map_err(map_diesel_error)?
            .map(|(facility, manager)| {
                (facility.into_domain(), manager.map(ManagerRow::into_domain))
            })
            .ok_or(RepositoryError::NotFound)
    }

    /// Fetch a facility together with its staff and trainers.
    pub fn find_with_staff_and_trainers(
        &self,
        id: i32,
    ) -> Result<(Facility, Vec<Staff>, Vec<Trainer>), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let facility = find_row(&mut conn, id)?.into_domain();

        let staff_members = staff::table
            .filter(staff::facility_id.eq(id))
            .order(staff::id.asc())
            .select(StaffRow::as_select())
            .load::<StaffRow>(&mut conn)
            .map_err(map_diesel_error)?
            .into_iter()
            .map(StaffRow::into_domain)
            .collect();

        let facility_trainers = trainers::table
            .filter(trainers::facility_id.eq(id))
            .order(trainers::id.asc())
            .select(TrainerRow::as_select())
            .load::<TrainerRow>(&mut conn)
            .map_err(map_diesel_error)?
            .into_iter()
            .map(TrainerRow::into_domain)
            .collect();

        Ok((facility, staff_members, facility_trainers))
    }

    /// List facilities with clamped offset/limit paging.
    pub fn list(&self, page: PageParams) -> Result<Vec<Facility>, RepositoryError> {
        let page = page.clamped();
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        facilities::table
            .order(facilities::id.asc())
            .offset(page.offset)
            .limit(page.limit)
            .select(FacilityRow::as_select())
            .load::<FacilityRow>(&mut conn)
            .map(|rows| rows.into_iter().map(FacilityRow::into_domain).collect())
            .map_err(map_diesel_error)
    }

    /// Apply a resolved update and re-fetch the record. An empty update
    /// verifies existence and returns the record unchanged.
    pub fn update(&self, id: i32, update: &FacilityUpdate) -> Result<Facility, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        if update.is_empty() {
            return find_row(&mut conn, id).map(FacilityRow::into_domain);
        }

        let changes = FacilityChangeset::from(update);
        let affected = diesel::update(facilities::table.find(id))
            .set(&changes)
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        find_row(&mut conn, id).map(FacilityRow::into_domain)
    }

    /// Delete a facility by id, returning the removed record.
    pub fn delete(&self, id: i32) -> Result<Facility, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = find_row(&mut conn, id)?;

        diesel::delete(facilities::table.find(id))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;

        Ok(row.into_domain())
    }
}

fn find_row(conn: &mut DbConnection, id: i32) -> Result<FacilityRow, RepositoryError> {
    facilities::table
        .find(id)
        .select(FacilityRow::as_select())
        .first::<FacilityRow>(conn)
        .optional()
        .map_err(map_diesel_error)?
        .ok_or(RepositoryError::NotFound)
}
