//! SQLite-backed gateway for staff records and their expansions.

use chrono::Utc;
use diesel::prelude::*;
use pagination::PageParams;

use crate::domain::{Facility, Manager, Owner, Staff, StaffDraft, StaffPatch};

use super::error_mapping::{RepositoryError, map_diesel_error, map_pool_error};
use super::models::{FacilityRow, ManagerRow, NewStaffRow, OwnerRow, StaffChangeset, StaffRow};
use super::pool::{DbConnection, DbPool};
use super::schema::{facilities, managers, owners, staff};

/// Diesel-backed repository for staff members.
#[derive(Clone)]
pub struct StaffRepository {
    pool: DbPool,
}

impl StaffRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a validated draft, returning the stored record. The
    /// employment date defaults to the insert timestamp.
    pub fn insert(&self, draft: &StaffDraft) -> Result<Staff, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let now = Utc::now().naive_utc();
        let row = NewStaffRow {
            name: &draft.name,
            email: draft.email.as_str(),
            bio: draft.bio.as_deref(),
            role: draft.role.as_str(),
            created_at: now,
            employment_date: draft
                .employment_date
                .map_or(now, |date| date.naive_utc()),
            owner_id: draft.owner_id,
            manager_id: draft.manager_id,
            facility_id: draft.facility_id,
        };

        diesel::insert_into(staff::table)
            .values(&row)
            .returning(StaffRow::as_returning())
            .get_result::<StaffRow>(&mut conn)
            .map(StaffRow::into_domain)
            .map_err(map_diesel_error)
    }

    /// Fetch a staff member by id.
    pub fn find(&self, id: i32) -> Result<Staff, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        find_row(&mut conn, id).map(StaffRow::into_domain)
    }

    /// Fetch a staff member together with their owner, when one is
    /// attached.
    pub fn find_with_owner(&self, id: i32) -> Result<(Staff, Option<Owner>), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        staff::table
            .left_join(owners::table)
            .filter(staff::id.eq(id))
            .select((StaffRow::as_select(), Option::<OwnerRow>::as_select()))
            .first::<(StaffRow, Option<OwnerRow>)>(&mut conn)
            .optional()
            .map_err(map_diesel_error)?
            .map(|(member, owner)| (member.into_domain(), owner.map(OwnerRow::into_domain)))
            .ok_or(RepositoryError::NotFound)
    }

    /// Fetch a staff member together with their manager, when one is
    /// attached.
    pub fn find_with_manager(&self, id: i32) -> Result<(Staff, Option<Manager>), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        staff::table
            .left_join(managers::table)
            .filter(staff::id.eq(id))
            .select((StaffRow::as_select(), Option::<ManagerRow>::as_select()))
            .first::<(StaffRow, Option<ManagerRow>)>(&mut conn)
            .optional()
            .map_err(map_diesel_error)?
            .map(|(member, manager)| (member.into_domain(), manager.map(ManagerRow::into_domain)))
            .ok_or(RepositoryError::NotFound)
    }

    /// Fetch a staff member together with the facility they work at.
    pub fn find_with_facility(&self, id: i32) -> Result<(Staff, Facility), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        staff::table
            .inner_join(facilities::table)
            .filter(staff::id.eq(id))
            .select((StaffRow::as_select(), FacilityRow::as_select()))
            .first::<(StaffRow, FacilityRow)>(&mut conn)
            .optional()
            .map_err(map_diesel_error)?
            .map(|(member, facility)| (member.into_domain(), facility.into_domain()))
            .ok_or(RepositoryError::NotFound)
    }

    /// List staff members with clamped offset/limit paging.
    pub fn list(&self, page: PageParams) -> Result<Vec<Staff>, RepositoryError> {
        let page = page.clamped();
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        staff::table
            .order(staff::id.asc())
            .offset(page.offset)
            .limit(page.limit)
            .select(StaffRow::as_select())
            .load::<StaffRow>(&mut conn)
            .map(|rows| rows.into_iter().map(StaffRow::into_domain).collect())
            .map_err(map_diesel_error)
    }

    /// Apply a partial update and re-fetch the record. An empty patch
    /// verifies existence and returns the record unchanged.
    pub fn update(&self, id: i32, patch: &StaffPatch) -> Result<Staff, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        if patch.is_empty() {
            return find_row(&mut conn, id).map(StaffRow::into_domain);
        }

        let changes = StaffChangeset::from(patch);
        let affected = diesel::update(staff::table.find(id))
            .set(&changes)
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        find_row(&mut conn, id).map(StaffRow::into_domain)
    }

    /// Delete a staff member by id, returning the removed record.
    pub fn delete(&self, id: i32) -> Result<Staff, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = find_row(&mut conn, id)?;

        diesel::delete(staff::table.find(id))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;

        Ok(row.into_domain())
    }
}

fn find_row(conn: &mut DbConnection, id: i32) -> Result<StaffRow, RepositoryError> {
    staff::table
        .find(id)
        .select(StaffRow::as_select())
        .first::<StaffRow>(conn)
        .optional()
        .map_err(map_diesel_error)?
        .ok_or(RepositoryError::NotFound)
}
