//! Diesel-backed persistence gateway: pool, schema, row models, and one
//! repository per entity.

pub mod error_mapping;
pub mod facility_repository;
pub mod manager_repository;
pub mod migrations;
pub mod models;
pub mod owner_repository;
pub mod pool;
pub mod schema;
pub mod staff_repository;
pub mod trainer_repository;

pub use error_mapping::RepositoryError;
pub use facility_repository::FacilityRepository;
pub use manager_repository::ManagerRepository;
pub use migrations::{MigrationError, run_migrations};
pub use owner_repository::OwnerRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
pub use staff_repository::StaffRepository;
pub use trainer_repository::TrainerRepository;
