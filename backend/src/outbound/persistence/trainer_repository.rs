//! SQLite-backed gateway for trainer records and their expansions.

use chrono::Utc;
use diesel::prelude::*;
use pagination::PageParams;

use crate::domain::{Facility, Manager, Owner, Trainer, TrainerDraft, TrainerPatch};

use super::error_mapping::{RepositoryError, map_diesel_error, map_pool_error};
use super::models::{FacilityRow, ManagerRow, NewTrainerRow, OwnerRow, TrainerChangeset, TrainerRow};
use super::pool::{DbConnection, DbPool};
use super::schema::{facilities, managers, owners, trainers};

/// Diesel-backed repository for trainers.
#[derive(Clone)]
pub struct TrainerRepository {
    pool: DbPool,
}

impl TrainerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a validated draft, returning the stored record. The
    /// employment date defaults to the insert timestamp.
    pub fn insert(&self, draft: &TrainerDraft) -> Result<Trainer, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let now = Utc::now().naive_utc();
        let row = NewTrainerRow {
            name: &draft.name,
            email: draft.email.as_ref().map(|email| email.as_str()),
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

        diesel::insert_into(trainers::table)
            .values(&row)
            .returning(TrainerRow::as_returning())
            .get_result::<TrainerRow>(&mut conn)
            .map(TrainerRow::into_domain)
            .map_err(map_diesel_error)
    }

    /// Fetch a trainer by id.
    pub fn find(&self, id: i32) -> Result<Trainer, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        find_row(&mut conn, id).map(TrainerRow::into_domain)
    }

    /// Fetch a trainer together with their owner, when one is attached.
    pub fn find_with_owner(&self, id: i32) -> Result<(Trainer, Option<Owner>), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        trainers::table
            .left_join(owners::table)
            .filter(trainers::id.eq(id))
            .select((TrainerRow::as_select(), Option::<OwnerRow>::as_select()))
            .first::<(TrainerRow, Option<OwnerRow>)>(&mut conn)
            .optional()
            .map_err(map_diesel_error)?
            .map(|(trainer, owner)| (trainer.into_domain(), owner.map(OwnerRow::into_domain)))
            .ok_or(RepositoryError::NotFound)
    }

    /// Fetch a trainer together with their manager, when one is attached.
    pub fn find_with_manager(&self, id: i32) -> Result<(Trainer, Option<Manager>), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        trainers::table
            .left_join(managers::table)
            .filter(trainers::id.eq(id))
            .select((TrainerRow::as_select(), Option::<ManagerRow>::as_select()))
            .first::<(TrainerRow, Option<ManagerRow>)>(&mut conn)
            .optional()
            .map_err(map_diesel_error)?
            .map(|(trainer, manager)| (trainer.into_domain(), manager.map(ManagerRow::into_domain)))
            .ok_or(RepositoryError::NotFound)
    }

    /// Fetch a trainer together with their facility, when one is attached.
    pub fn find_with_facility(
        &self,
        id: i32,
    ) -> Result<(Trainer, Option<Facility>), RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        trainers::table
            .left_join(facilities::table)
            .filter(trainers::id.eq(id))
            .select((TrainerRow::as_select(), Option::<FacilityRow>::as_select()))
            .first::<(TrainerRow, Option<FacilityRow>)>(&mut conn)
            .optional()
            .map_err(map_diesel_error)?
            .map(|(trainer, facility)| {
                (trainer.into_domain(), facility.map(FacilityRow::into_domain))
            })
            .ok_or(RepositoryError::NotFound)
    }

    /// List trainers with clamped offset/limit paging.
    pub fn list(&self, page: PageParams) -> Result<Vec<Trainer>, RepositoryError> {
        let page = page.clamped();
        let mut conn = self.pool.get().map_err(map_pool_error)?;

        trainers::table
            .order(trainers::id.asc())
            .offset(page.offset)
            .limit(page.limit)
            .select(TrainerRow::as_select())
            .load::<TrainerRow>(&mut conn)
            .map(|rows| rows.into_iter().map(TrainerRow::into_domain).collect())
            .map_err(map_diesel_error)
    }

    /// Apply a partial update and re-fetch the record. An empty patch
    /// verifies existence and returns the record unchanged.
    pub fn update(&self, id: i32, patch: &TrainerPatch) -> Result<Trainer, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        if patch.is_empty() {
            return find_row(&mut conn, id).map(TrainerRow::into_domain);
        }

        let changes = TrainerChangeset::from(patch);
        let affected = diesel::update(trainers::table.find(id))
            .set(&changes)
            .execute(&mut conn)
            .map_err(map_diesel_error)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        find_row(&mut conn, id).map(TrainerRow::into_domain)
    }

    /// Delete a trainer by id, returning the removed record.
    pub fn delete(&self, id: i32) -> Result<Trainer, RepositoryError> {
        let mut conn = self.pool.get().map_err(map_pool_error)?;
        let row = find_row(&mut conn, id)?;

        diesel::delete(trainers::table.find(id))
            .execute(&mut conn)
            .map_err(map_diesel_error)?;

        Ok(row.into_domain())
    }
}

fn find_row(conn: &mut DbConnection, id: i32) -> Result<TrainerRow, RepositoryError> {
    trainers::table
        .find(id)
        .select(TrainerRow::as_select())
        .first::<TrainerRow>(conn)
        .optional()
        .map_err(map_diesel_error)?
        .ok_or(RepositoryError::NotFound)
}
