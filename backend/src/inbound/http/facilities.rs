//! Facility HTTP handlers.
//!
//! ```text
//! POST   /facilities
//! GET    /facilities
//! GET    /facilities/{facility_id}
//! GET    /facilities/{facility_id}/owner
//! GET    /facilities/{facility_id}/manager
//! GET    /facilities/{facility_id}/staff/trainers
//! PATCH  /facilities/{facility_id}
//! DELETE /facilities/{facility_id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use pagination::PageParams;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AddressInput, AddressPatch, Facility, FacilityDraft, FacilityPatch};
use crate::inbound::http::error::{ApiError, ApiResult, map_delete_error, map_repo_error};
use crate::inbound::http::managers::ManagerRead;
use crate::inbound::http::owners::OwnerRead;
use crate::inbound::http::staff::StaffRead;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::trainers::TrainerRead;
use crate::inbound::http::validation::double_option;

const ENTITY: &str = "Facility";

/// Request payload for creating a facility. Address fields are flat, as
/// stored; `state_abbr` is derived from `state` when omitted.
#[derive(Debug, Deserialize, ToSchema)]
pub struct FacilityCreate {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub state_abbr: Option<String>,
    pub zip_code: String,
    pub owner_id: i32,
    pub manager_id: Option<i32>,
}

/// Facility as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct FacilityRead {
    pub id: i32,
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub state_abbr: String,
    pub zip_code: String,
    pub owner_id: i32,
    pub manager_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<Facility> for FacilityRead {
    fn from(value: Facility) -> Self {
        Self {
            id: value.id,
            name: value.name,
            street: value.address.street,
            city: value.address.city,
            state: value.address.state,
            state_abbr: value.address.state_abbr,
            zip_code: value.address.zip_code,
            owner_id: value.owner_id,
            manager_id: value.manager_id,
            created_at: value.created_at,
        }
    }
}

/// Partial update payload; absent fields are left untouched, an explicit
/// null `manager_id` detaches the facility from its manager.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct FacilityUpdate {
    pub name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub state_abbr: Option<String>,
    pub zip_code: Option<String>,
    pub owner_id: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub manager_id: Option<Option<i32>>,
}

/// Facility nested with its owner.
#[derive(Debug, Serialize, ToSchema)]
pub struct FacilityWithOwner {
    #[serde(flatten)]
    pub facility: FacilityRead,
    pub owner: OwnerRead,
}

/// Facility nested with its manager.
#[derive(Debug, Serialize, ToSchema)]
pub struct FacilityWithManager {
    #[serde(flatten)]
    pub facility: FacilityRead,
    pub manager: Option<ManagerRead>,
}

/// Facility nested with its trainers and staff.
#[derive(Debug, Serialize, ToSchema)]
pub struct FacilityWithStaffAndTrainers {
    #[serde(flatten)]
    pub facility: FacilityRead,
    pub trainers: Vec<TrainerRead>,
    pub staff: Vec<StaffRead>,
}

/// Create a facility.
#[utoipa::path(
    post,
    path = "/facilities",
    request_body = FacilityCreate,
    responses(
        (status = 201, description = "Facility created", body = FacilityRead),
        (status = 400, description = "Validation failed", body = ApiError)
    ),
    tags = ["facilities"],
    operation_id = "createFacility"
)]
#[post("/facilities")]
pub async fn create_facility(
    state: web::Data<HttpState>,
    payload: web::Json<FacilityCreate>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let draft = FacilityDraft::parse(
        &payload.name,
        AddressInput {
            street: payload.street,
            city: payload.city,
            state: payload.state,
            state_abbr: payload.state_abbr,
            zip_code: payload.zip_code,
        },
        payload.owner_id,
        payload.manager_id,
    )?;

    let repo = state.facilities.clone();
    let facility = web::block(move || repo.insert(&draft))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(HttpResponse::Created().json(FacilityRead::from(facility)))
}

/// List facilities.
#[utoipa::path(
    get,
    path = "/facilities",
    params(
        ("offset" = Option<i64>, Query, description = "Number of records to skip"),
        ("limit" = Option<i64>, Query, description = "Page size, capped at 100")
    ),
    responses(
        (status = 200, description = "Facilities", body = [FacilityRead])
    ),
    tags = ["facilities"],
    operation_id = "listFacilities"
)]
#[get("/facilities")]
pub async fn list_facilities(
    state: web::Data<HttpState>,
    query: web::Query<PageParams>,
) -> ApiResult<web::Json<Vec<FacilityRead>>> {
    let page = query.into_inner();
    let repo = state.facilities.clone();
    let facilities = web::block(move || repo.list(page))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(
        facilities.into_iter().map(FacilityRead::from).collect(),
    ))
}

/// Fetch a facility.
#[utoipa::path(
    get,
    path = "/facilities/{facility_id}",
    params(("facility_id" = i32, Path, description = "Facility identifier")),
    responses(
        (status = 200, description = "Facility", body = FacilityRead),
        (status = 404, description = "Facility not found", body = ApiError)
    ),
    tags = ["facilities"],
    operation_id = "getFacility"
)]
#[get("/facilities/{facility_id}")]
pub async fn get_facility(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<FacilityRead>> {
    let id = path.into_inner();
    let repo = state.facilities.clone();
    let facility = web::block(move || repo.find(id))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(facility.into()))
}

/// Fetch a facility together with its owner.
#[utoipa::path(
    get,
    path = "/facilities/{facility_id}/owner",
    params(("facility_id" = i32, Path, description = "Facility identifier")),
    responses(
        (status = 200, description = "Facility with owner", body = FacilityWithOwner),
        (status = 404, description = "Facility not found", body = ApiError)
    ),
    tags = ["facilities"],
    operation_id = "getFacilityWithOwner"
)]
#[get("/facilities/{facility_id}/owner")]
pub async fn get_facility_with_owner(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<FacilityWithOwner>> {
    let id = path.into_inner();
    let repo = state.facilities.clone();
    let (facility, owner) = web::block(move || repo.find_with_owner(id))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(FacilityWithOwner {
        facility: facility.into(),
        owner: owner.into(),
    }))
}

/// Fetch a facility together with its manager.
#[utoipa::path(
    get,
    path = "/facilities/{facility_id}/manager",
    params(("facility_id" = i32, Path, description = "Facility identifier")),
    responses(
        (status = 200, description = "Facility with manager", body = FacilityWithManager),
        (status = 404, description = "Facility not found", body = ApiError)
    ),
    tags = ["facilities"],
    operation_id = "getFacilityWithManager"
)]
#[get("/facilities/{facility_id}/manager")]
pub async fn get_facility_with_manager(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<FacilityWithManager>> {
    let id = path.into_inner();
    let repo = state.facilities.clone();
    let (facility, manager) = web::block(move || repo.find_with_manager(id))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(FacilityWithManager {
        facility: facility.into(),
        manager: manager.map(ManagerRead::from),
    }))
}

/// Fetch a facility together with its staff and trainers.
#[utoipa::path(
    get,
    path = "/facilities/{facility_id}/staff/trainers",
    params(("facility_id" = i32, Path, description = "Facility identifier")),
    responses(
        (status = 200, description = "Facility with staff and trainers", body = FacilityWithStaffAndTrainers),
        (status = 404, description = "Facility not found", body = ApiError)
    ),
    tags = ["facilities"],
    operation_id = "getFacilityWithStaffAndTrainers"
)]
#[get("/facilities/{facility_id}/staff/trainers")]
pub async fn get_facility_with_staff_and_trainers(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<FacilityWithStaffAndTrainers>> {
    let id = path.into_inner();
    let repo = state.facilities.clone();
    let (facility, staff_members, trainers) =
        web::block(move || repo.find_with_staff_and_trainers(id))
            .await
            .map_err(ApiError::from_blocking)?
            .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(FacilityWithStaffAndTrainers {
        facility: facility.into(),
        trainers: trainers.into_iter().map(TrainerRead::from).collect(),
        staff: staff_members.into_iter().map(StaffRead::from).collect(),
    }))
}

/// Apply a partial update to a facility.
///
/// Address fields patch individually; changing `state` without
/// `state_abbr` re-derives the abbreviation, and a supplied abbreviation
/// must correspond to the effective state.
#[utoipa::path(
    patch,
    path = "/facilities/{facility_id}",
    params(("facility_id" = i32, Path, description = "Facility identifier")),
    request_body = FacilityUpdate,
    responses(
        (status = 200, description = "Updated facility", body = FacilityRead),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Facility not found", body = ApiError)
    ),
    tags = ["facilities"],
    operation_id = "updateFacility"
)]
#[patch("/facilities/{facility_id}")]
pub async fn update_facility(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<FacilityUpdate>,
) -> ApiResult<web::Json<FacilityRead>> {
    let id = path.into_inner();
    let payload = payload.into_inner();
    let patch = FacilityPatch::parse(
        payload.name.as_deref(),
        AddressPatch {
            street: payload.street,
            city: payload.city,
            state: payload.state,
            state_abbr: payload.state_abbr,
            zip_code: payload.zip_code,
        },
        payload.owner_id,
        payload.manager_id,
    )?;

    // Fetch the stored record so address changes validate against it.
    let repo = state.facilities.clone();
    let current = web::block(move || repo.find(id))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;
    let update = patch.resolve(&current)?;

    let repo = state.facilities.clone();
    let facility = web::block(move || repo.update(id, &update))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(facility.into()))
}

/// Delete a facility, returning the removed record.
#[utoipa::path(
    delete,
    path = "/facilities/{facility_id}",
    params(("facility_id" = i32, Path, description = "Facility identifier")),
    responses(
        (status = 200, description = "Deleted facility", body = FacilityRead),
        (status = 404, description = "Facility not found", body = ApiError),
        (status = 409, description = "Facility still has dependent records", body = ApiError)
    ),
    tags = ["facilities"],
    operation_id = "deleteFacility"
)]
#[delete("/facilities/{facility_id}")]
pub async fn delete_facility(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<FacilityRead>> {
    let id = path.into_inner();
    let repo = state.facilities.clone();
    let facility = web::block(move || repo.delete(id))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_delete_error(err, ENTITY))?;

    Ok(web::Json(facility.into()))
}
