//! SQLite-backed gateway for manager records.

use chrono::Utc;
use diesel::prelude::*;
use pagination::PageParams;

use crate::domain::{Manager, ManagerDraft, ManagerPatch, Owner};

use super::error_mapping::{RepositoryError, map_diesel_error, map_pool_error};
use super::models::{ManagerChangeset, ManagerRow, NewManagerRow, OwnerRow};
use super::pool::{DbConnection, DbPool};
use super::schema::{managers, owners};

/// Diesel-backed repository for managers.
#[derive(Clone)]
pub struct ManagerRepository {
    pool: DbPool,
}

impl ManagerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a validated draft, returning the stored record.
    pub fn insert(&self, draft: &ManagerDraft) -> Result<Manager, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = NewManagerRow {
            name: &draft.name,
            email: draft.email.as_str(),
            role: draft.role.as_str(),
            created_at: Utc::now().naive_utc(),
            owner_id: draft.owner_id,
        };

        diesel::insert_into(managers::table)
            .values(&row)
            .returning(ManagerRow::as_returning())
            .get_result::<ManagerRow>(&mut conn)
            .map(ManagerRow::into_domain)
            .map_err(map_diesel_error)
    }

    /// Fetch a manager by id.
    pub fn find(&self, id: i32) -> Result<Manager, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        find_row(&mut conn, id).map(ManagerRow::into_domain)
    }

    /// Fetch a manager together with their owner, when one is attached.
    pub fn find_with_owner(&self, id: i32) -> Result<(Manager, Option<Owner>), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        managers::table
            .left_join(owners::table)
            .filter(managers::id.eq(id))
            .select((ManagerRow::as_select(), Option::<OwnerRow>::as_select()))
            .first::<(ManagerRow, Option<OwnerRow>)>(&mut conn)
            .optional()
            .map_err(map_diesel_error)?
            .map(|(manager, owner)| (manager.into_domain(), owner.map(OwnerRow::into_domain)))
            .ok_or(RepositoryError::NotFound)
    }

    /// List managers with clamped offset/limit paging.
    pub fn list(&self, page: PageParams) -> Result<Vec<Manager>, RepositoryError> {
        let page = page.clamped();
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        managers::table
            .order(managers::id.asc())
            .offset(page.offset)
            .limit(page.limit)
            .select(ManagerRow::as_select())
            .load::<ManagerRow>(&mut conn)
            .map(|rows| rows.into_iter().map(ManagerRow::into_domain).collect())
            .map_err(map_diesel_error)
    }

    /// Apply a partial update and re-fetch the record. An empty patch
    /// verifies existence and returns the record unchanged.
    pub fn update(&self, id: i32, patch: &ManagerPatch) -> Result<Manager, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        if patch.is_empty() {
            return find_row(&mut conn, id).map(ManagerRow::into_domain);
        }

        let changes = ManagerChangeset::from(patch);
        let affected = diesel::update(managers::table.find(id))
            .set(&changes)
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        find_row(&mut conn, id).map(ManagerRow::into_domain)
    }

    /// Delete a manager by id, returning the removed record.
    pub fn delete(&self, id: i32) -> Result<Manager, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = find_row(&mut conn, id)?;

        diesel::delete(managers::table.find(id))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;

        Ok(row.into_domain())
    }
}

fn find_row(conn: &mut DbConnection, id: i32) -> Result<ManagerRow, RepositoryError> {
    managers::table
        .find(id)
        .select(ManagerRow::as_select())
        .first::<ManagerRow>(conn)
        .optional()
        .map_err(map_diesel_error)?
        .ok_or(RepositoryError::NotFound)
}
