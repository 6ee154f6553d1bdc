//! SQLite-backed gateway for owner records.

use chrono::Utc;
use diesel::prelude::*;
use pagination::PageParams;

use crate::domain::{Manager, Owner, OwnerDraft, OwnerPatch};

use super::error_mapping::{RepositoryError, map_diesel_error, map_pool_error};
use super::models::{ManagerRow, NewOwnerRow, OwnerChangeset, OwnerRow};
use super::pool::{DbConnection, DbPool};
use super::schema::{managers, owners};

/// Diesel-backed repository for owners.
#[derive(Clone)]
pub struct OwnerRepository {
    pool: DbPool,
}

impl OwnerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a validated draft, returning the stored record.
    pub fn insert(&self, draft: &OwnerDraft) -> Result<Owner, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = NewOwnerRow {
            name: &draft.name,
            email: draft.email.as_str(),
            role: draft.role.as_str(),
            created_at: Utc::now().naive_utc(),
        };

        diesel::insert_into(owners::table)
            .values(&row)
            .returning(OwnerRow::as_returning())
            .get_result::<OwnerRow>(&mut conn)
            .map(OwnerRow::into_domain)
            .map_err(map_diesel_error)
    }

    /// Fetch an owner by id.
    pub fn find(&self, id: i32) -> Result<Owner, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        find_row(&mut conn, id).map(OwnerRow::into_domain)
    }

    /// Fetch an owner together with the managers that report to them.
    pub fn find_with_managers(&self, id: i32) -> Result<(Owner, Vec<Manager>), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let owner = find_row(&mut conn, id)?.into_domain();

        let managers = managers::table
            .filter(managers::owner_id.eq(id))
            .order(managers::id.asc())
            .select(ManagerRow::as_select())
            .load::<ManagerRow>(&mut conn)
            .map_err(map_diesel_error)?
            .into_iter()
            .map(ManagerRow::into_domain)
            .collect();

        Ok((owner, managers))
    }

    /// List owners with clamped offset/limit paging.
    pub fn list(&self, page: PageParams) -> Result<Vec<Owner>, RepositoryError> {
        let page = page.clamped();
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        owners::table
            .order(owners::id.asc())
            .offset(page.offset)
            .limit(page.limit)
            .select(OwnerRow::as_select())
            .load::<OwnerRow>(&mut conn)
            .map(|rows| rows.into_iter().map(OwnerRow::into_domain).collect())
            .map_err(map_diesel_error)
    }

    /// Apply a partial update and re-fetch the record. An empty patch
    /// verifies existence and returns the record unchanged.
    pub fn update(&self, id: i32, patch: &OwnerPatch) -> Result<Owner, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        if patch.is_empty() {
            return find_row(&mut conn, id).map(OwnerRow::into_domain);
        }

        let changes = OwnerChangeset::from(patch);
        let affected = diesel::update(owners::table.find(id))
            .set(&changes)
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        find_row(&mut conn, id).map(OwnerRow::into_domain)
    }

    /// Delete an owner by id, returning the removed record.
    pub fn delete(&self, id: i32) -> Result<Owner, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = find_row(&mut conn, id)?;

        diesel::delete(owners::table.find(id))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;

        Ok(row.into_domain())
    }
}

fn find_row(conn: &mut DbConnection, id: i32) -> Result<OwnerRow, RepositoryError> {
    owners::table
        .find(id)
        .select(OwnerRow::as_select())
        .first::<OwnerRow>(conn)
        .optional()
        .map_err(map_diesel_error)?
        .ok_or(RepositoryError::NotFound)
}
