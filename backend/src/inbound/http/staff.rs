//! Staff HTTP handlers.
//!
//! ```text
//! POST   /staff
//! GET    /staff
//! GET    /staff/{staff_id}
//! GET    /staff/{staff_id}/owner
//! GET    /staff/{staff_id}/manager
//! GET    /staff/{staff_id}/facility
//! PATCH  /staff/{staff_id}
//! DELETE /staff/{staff_id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use pagination::PageParams;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Role, Staff, StaffDraft, StaffDraftInput, StaffPatch, StaffPatchInput};
use crate::inbound::http::error::{ApiError, ApiResult, map_delete_error, map_repo_error};
use crate::inbound::http::facilities::FacilityRead;
use crate::inbound::http::managers::ManagerRead;
use crate::inbound::http::owners::OwnerRead;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{double_option, ensure_email_deliverable};

const ENTITY: &str = "Staff";

/// Request payload for creating a staff member.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StaffCreate {
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub role: Option<Role>,
    pub employment_date: Option<DateTime<Utc>>,
    pub owner_id: Option<i32>,
    pub manager_id: Option<i32>,
    pub facility_id: i32,
}

/// Staff member as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct StaffRead {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub employment_date: DateTime<Utc>,
    pub owner_id: Option<i32>,
    pub manager_id: Option<i32>,
    pub facility_id: i32,
}

impl From<Staff> for StaffRead {
    fn from(value: Staff) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            bio: value.bio,
            role: value.role,
            created_at: value.created_at,
            employment_date: value.employment_date,
            owner_id: value.owner_id,
            manager_id: value.manager_id,
            facility_id: value.facility_id,
        }
    }
}

/// Partial update payload. Nullable fields accept an explicit null to
/// clear the stored value; absent fields are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct StaffUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub bio: Option<Option<String>>,
    pub role: Option<Role>,
    pub employment_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "double_option")]
    pub owner_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub manager_id: Option<Option<i32>>,
    pub facility_id: Option<i32>,
}

/// Staff member nested with their owner.
#[derive(Debug, Serialize, ToSchema)]
pub struct StaffWithOwner {
    #[serde(flatten)]
    pub staff: StaffRead,
    pub owner: Option<OwnerRead>,
}

/// Staff member nested with their manager.
#[derive(Debug, Serialize, ToSchema)]
pub struct StaffWithManager {
    #[serde(flatten)]
    pub staff: StaffRead,
    pub manager: Option<ManagerRead>,
}

/// Staff member nested with the facility they work at.
#[derive(Debug, Serialize, ToSchema)]
pub struct StaffWithFacility {
    #[serde(flatten)]
    pub staff: StaffRead,
    pub facility: FacilityRead,
}

/// Create a staff member.
#[utoipa::path(
    post,
    path = "/staff",
    request_body = StaffCreate,
    responses(
        (status = 201, description = "Staff member created", body = StaffRead),
        (status = 400, description = "Validation failed", body = ApiError)
    ),
    tags = ["staff"],
    operation_id = "createStaff"
)]
#[post("/staff")]
pub async fn create_staff(
    state: web::Data<HttpState>,
    payload: web::Json<StaffCreate>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let draft = StaffDraft::parse(StaffDraftInput {
        name: payload.name,
        email: payload.email,
        bio: payload.bio,
        role: payload.role,
        employment_date: payload.employment_date,
        owner_id: payload.owner_id,
        manager_id: payload.manager_id,
        facility_id: payload.facility_id,
    })?;
    ensure_email_deliverable(state.mx.as_ref(), &draft.email).await?;

    let repo = state.staff.clone();
    let member = web::block(move || repo.insert(&draft))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(HttpResponse::Created().json(StaffRead::from(member)))
}

/// List staff members.
#[utoipa::path(
    get,
    path = "/staff",
    params(
        ("offset" = Option<i64>, Query, description = "Number of records to skip"),
        ("limit" = Option<i64>, Query, description = "Page size, capped at 100")
    ),
    responses(
        (status = 200, description = "Staff members", body = [StaffRead])
    ),
    tags = ["staff"],
    operation_id = "listStaff"
)]
#[get("/staff")]
pub async fn list_staff(
    state: web::Data<HttpState>,
    query: web::Query<PageParams>,
) -> ApiResult<web::Json<Vec<StaffRead>>> {
    let page = query.into_inner();
    let repo = state.staff.clone();
    let members = web::block(move || repo.list(page))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(members.into_iter().map(StaffRead::from).collect()))
}

/// Fetch a staff member.
#[utoipa::path(
    get,
    path = "/staff/{staff_id}",
    params(("staff_id" = i32, Path, description = "Staff identifier")),
    responses(
        (status = 200, description = "Staff member", body = StaffRead),
        (status = 404, description = "Staff not found", body = ApiError)
    ),
    tags = ["staff"],
    operation_id = "getStaff"
)]
#[get("/staff/{staff_id}")]
pub async fn get_staff(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<StaffRead>> {
    let id = path.into_inner();
    let repo = state.staff.clone();
    let member = web::block(move || repo.find(id))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(member.into()))
}

/// Fetch a staff member together with their owner.
#[utoipa::path(
    get,
    path = "/staff/{staff_id}/owner",
    params(("staff_id" = i32, Path, description = "Staff identifier")),
    responses(
        (status = 200, description = "Staff member with owner", body = StaffWithOwner),
        (status = 404, description = "Staff not found", body = ApiError)
    ),
    tags = ["staff"],
    operation_id = "getStaffWithOwner"
)]
#[get("/staff/{staff_id}/owner")]
pub async fn get_staff_with_owner(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<StaffWithOwner>> {
    let id = path.into_inner();
    let repo = state.staff.clone();
    let (member, owner) = web::block(move || repo.find_with_owner(id))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(StaffWithOwner {
        staff: member.into(),
        owner: owner.map(OwnerRead::from),
    }))
}

/// Fetch a staff member together with their manager.
#[utoipa::path(
    get,
    path = "/staff/{staff_id}/manager",
    params(("staff_id" = i32, Path, description = "Staff identifier")),
    responses(
        (status = 200, description = "Staff member with manager", body = StaffWithManager),
        (status = 404, description = "Staff not found", body = ApiError)
    ),
    tags = ["staff"],
    operation_id = "getStaffWithManager"
)]
#[get("/staff/{staff_id}/manager")]
pub async fn get_staff_with_manager(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<StaffWithManager>> {
    let id = path.into_inner();
    let repo = state.staff.clone();
    let (member, manager) = web::block(move || repo.find_with_manager(id))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(StaffWithManager {
        staff: member.into(),
        manager: manager.map(ManagerRead::from),
    }))
}

/// Fetch a staff member together with the facility they work at.
#[utoipa::path(
    get,
    path = "/staff/{staff_id}/facility",
    params(("staff_id" = i32, Path, description = "Staff identifier")),
    responses(
        (status = 200, description = "Staff member with facility", body = StaffWithFacility),
        (status = 404, description = "Staff not found", body = ApiError)
    ),
    tags = ["staff"],
    operation_id = "getStaffWithFacility"
)]
#[get("/staff/{staff_id}/facility")]
pub async fn get_staff_with_facility(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<StaffWithFacility>> {
    let id = path.into_inner();
    let repo = state.staff.clone();
    let (member, facility) = web::block(move || repo.find_with_facility(id))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(StaffWithFacility {
        staff: member.into(),
        facility: facility.into(),
    }))
}

/// Apply a partial update to a staff member.
#[utoipa::path(
    patch,
    path = "/staff/{staff_id}",
    params(("staff_id" = i32, Path, description = "Staff identifier")),
    request_body = StaffUpdate,
    responses(
        (status = 200, description = "Updated staff member", body = StaffRead),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Staff not found", body = ApiError)
    ),
    tags = ["staff"],
    operation_id = "updateStaff"
)]
#[patch("/staff/{staff_id}")]
pub async fn update_staff(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<StaffUpdate>,
) -> ApiResult<web::Json<StaffRead>> {
    let id = path.into_inner();
    let payload = payload.into_inner();
    let patch = StaffPatch::parse(StaffPatchInput {
        name: payload.name,
        email: payload.email,
        bio: payload.bio,
        role: payload.role,
        employment_date: payload.employment_date,
        owner_id: payload.owner_id,
        manager_id: payload.manager_id,
        facility_id: payload.facility_id,
    })?;
    if let Some(email) = &patch.email {
        ensure_email_deliverable(state.mx.as_ref(), email).await?;
    }

    let repo = state.staff.clone();
    let member = web::block(move || repo.update(id, &patch))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(member.into()))
}

/// Delete a staff member, returning the removed record.
#[utoipa::path(
    delete,
    path = "/staff/{staff_id}",
    params(("staff_id" = i32, Path, description = "Staff identifier")),
    responses(
        (status = 200, description = "Deleted staff member", body = StaffRead),
        (status = 404, description = "Staff not found", body = ApiError)
    ),
    tags = ["staff"],
    operation_id = "deleteStaff"
)]
#[delete("/staff/{staff_id}")]
pub async fn delete_staff(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<StaffRead>> {
    let id = path.into_inner();
    let repo = state.staff.clone();
    let member = web::block(move || repo.delete(id))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_delete_error(err, ENTITY))?;

    Ok(web::Json(member.into()))
}
