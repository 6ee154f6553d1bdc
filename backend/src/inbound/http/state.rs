//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend
//! only on the entity repositories and the resolver port, and tests can
//! substitute a fixture resolver and a throwaway database.

use std::sync::Arc;

use crate::domain::ports::MxResolver;
use crate::outbound::persistence::{
    DbPool, FacilityRepository, ManagerRepository, OwnerRepository, StaffRepository,
    TrainerRepository,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub owners: OwnerRepository,
    pub managers: ManagerRepository,
    pub facilities: FacilityRepository,
    pub trainers: TrainerRepository,
    pub staff: StaffRepository,
    pub mx: Arc<dyn MxResolver>,
}

impl HttpState {
    /// Construct the handler state over one shared pool.
    pub fn new(pool: DbPool, mx: Arc<dyn MxResolver>) -> Self {
        Self {
            owners: OwnerRepository::new(pool.clone()),
            managers: ManagerRepository::new(pool.clone()),
            facilities: FacilityRepository::new(pool.clone()),
            trainers: TrainerRepository::new(pool.clone()),
            staff: StaffRepository::new(pool),
            mx,
        }
    }
}
