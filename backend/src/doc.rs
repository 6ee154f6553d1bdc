//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. The generated specification backs
//! Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::error::ErrorCode;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::facilities::{
    FacilityCreate, FacilityRead, FacilityUpdate, FacilityWithManager, FacilityWithOwner,
    FacilityWithStaffAndTrainers,
};
use crate::inbound::http::managers::{ManagerCreate, ManagerRead, ManagerUpdate, ManagerWithOwner};
use crate::inbound::http::owners::{OwnerCreate, OwnerRead, OwnerUpdate, OwnerWithManagers};
use crate::inbound::http::staff::{
    StaffCreate, StaffRead, StaffUpdate, StaffWithFacility, StaffWithManager, StaffWithOwner,
};
use crate::inbound::http::trainers::{
    TrainerCreate, TrainerRead, TrainerUpdate, TrainerWithFacility, TrainerWithManager,
    TrainerWithOwner,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gym management API",
        description = "CRUD endpoints for owners, managers, facilities, trainers, and staff."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::owners::create_owner,
        crate::inbound::http::owners::list_owners,
        crate::inbound::http::owners::get_owner,
        crate::inbound::http::owners::update_owner,
        crate::inbound::http::owners::delete_owner,
        crate::inbound::http::managers::create_manager,
        crate::inbound::http::managers::list_managers,
        crate::inbound::http::managers::get_manager,
        crate::inbound::http::managers::update_manager,
        crate::inbound::http::managers::delete_manager,
        crate::inbound::http::facilities::create_facility,
        crate::inbound::http::facilities::list_facilities,
        crate::inbound::http::facilities::get_facility,
        crate::inbound::http::facilities::get_facility_with_owner,
        crate::inbound::http::facilities::get_facility_with_manager,
        crate::inbound::http::facilities::get_facility_with_staff_and_trainers,
        crate::inbound::http::facilities::update_facility,
        crate::inbound::http::facilities::delete_facility,
        crate::inbound::http::trainers::create_trainer,
        crate::inbound::http::trainers::list_trainers,
        crate::inbound::http::trainers::get_trainer,
        crate::inbound::http::trainers::get_trainer_with_owner,
        crate::inbound::http::trainers::get_trainer_with_manager,
        crate::inbound::http::trainers::get_trainer_with_facility,
        crate::inbound::http::trainers::update_trainer,
        crate::inbound::http::trainers::delete_trainer,
        crate::inbound::http::staff::create_staff,
        crate::inbound::http::staff::list_staff,
        crate::inbound::http::staff::get_staff,
        crate::inbound::http::staff::get_staff_with_owner,
        crate::inbound::http::staff::get_staff_with_manager,
        crate::inbound::http::staff::get_staff_with_facility,
        crate::inbound::http::staff::update_staff,
        crate::inbound::http::staff::delete_staff,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        OwnerCreate,
        OwnerRead,
        OwnerUpdate,
        OwnerWithManagers,
        ManagerCreate,
        ManagerRead,
        ManagerUpdate,
        ManagerWithOwner,
        FacilityCreate,
        FacilityRead,
        FacilityUpdate,
        FacilityWithOwner,
        FacilityWithManager,
        FacilityWithStaffAndTrainers,
        TrainerCreate,
        TrainerRead,
        TrainerUpdate,
        TrainerWithOwner,
        TrainerWithManager,
        TrainerWithFacility,
        StaffCreate,
        StaffRead,
        StaffUpdate,
        StaffWithOwner,
        StaffWithManager,
        StaffWithFacility,
    )),
    tags(
        (name = "owners", description = "Operations on gym owners"),
        (name = "managers", description = "Operations on managers"),
        (name = "facilities", description = "Operations on facilities"),
        (name = "trainers", description = "Operations on trainers"),
        (name = "staff", description = "Operations on staff members"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
