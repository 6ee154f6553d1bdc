//! HTTP inbound adapter exposing the REST endpoints.

pub mod error;
pub mod facilities;
pub mod health;
pub mod managers;
pub mod owners;
pub mod staff;
pub mod state;
pub mod trainers;
pub mod validation;

pub use error::{ApiError, ApiResult};
pub use state::HttpState;

use actix_web::web;

/// Register every REST endpoint on the given service config.
///
/// Health probes are registered separately so they stay reachable before
/// the handler state exists.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(owners::create_owner)
        .service(owners::list_owners)
        .service(owners::get_owner)
        .service(owners::update_owner)
        .service(owners::delete_owner)
        .service(managers::create_manager)
        .service(managers::list_managers)
        .service(managers::get_manager)
        .service(managers::update_manager)
        .service(managers::delete_manager)
        .service(facilities::create_facility)
        .service(facilities::list_facilities)
        .service(facilities::get_facility)
        .service(facilities::get_facility_with_owner)
        .service(facilities::get_facility_with_manager)
        .service(facilities::get_facility_with_staff_and_trainers)
        .service(facilities::update_facility)
        .service(facilities::delete_facility)
        .service(trainers::create_trainer)
        .service(trainers::list_trainers)
        .service(trainers::get_trainer)
        .service(trainers::get_trainer_with_owner)
        .service(trainers::get_trainer_with_manager)
        .service(trainers::get_trainer_with_facility)
        .service(trainers::update_trainer)
        .service(trainers::delete_trainer)
        .service(staff::create_staff)
        .service(staff::list_staff)
        .service(staff::get_staff)
        .service(staff::get_staff_with_owner)
        .service(staff::get_staff_with_manager)
        .service(staff::get_staff_with_facility)
        .service(staff::update_staff)
        .service(staff::delete_staff);
}
