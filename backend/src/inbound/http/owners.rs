//! Owner HTTP handlers.
//!
//! ```text
//! POST   /owners
//! GET    /owners
//! GET    /owners/{owner_id}
//! PATCH  /owners/{owner_id}
//! DELETE /owners/{owner_id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use pagination::PageParams;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Owner, OwnerDraft, OwnerPatch, Role};
use crate::inbound::http::error::{ApiError, ApiResult, map_delete_error, map_repo_error};
use crate::inbound::http::managers::ManagerRead;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::ensure_email_deliverable;

const ENTITY: &str = "Owner";

/// Request payload for creating an owner.
#[derive(Debug, Deserialize, ToSchema)]
pub struct OwnerCreate {
    pub name: String,
    pub email: String,
    pub role: Option<Role>,
}

/// Owner as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct OwnerRead {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<Owner> for OwnerRead {
    fn from(value: Owner) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            role: value.role,
            created_at: value.created_at,
        }
    }
}

/// Partial update payload; absent fields are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OwnerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

/// Owner nested with the managers that report to them.
#[derive(Debug, Serialize, ToSchema)]
pub struct OwnerWithManagers {
    #[serde(flatten)]
    pub owner: OwnerRead,
    pub managers: Vec<ManagerRead>,
}

/// Create an owner.
#[utoipa::path(
    post,
    path = "/owners",
    request_body = OwnerCreate,
    responses(
        (status = 201, description = "Owner created", body = OwnerRead),
        (status = 400, description = "Validation failed", body = ApiError)
    ),
    tags = ["owners"],
    operation_id = "createOwner"
)]
#[post("/owners")]
pub async fn create_owner(
    state: web::Data<HttpState>,
    payload: web::Json<OwnerCreate>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let draft = OwnerDraft::parse(&payload.name, &payload.email, payload.role)?;
    ensure_email_deliverable(state.mx.as_ref(), &draft.email).await?;

    let repo = state.owners.clone();
    let owner = web::block(move || repo.insert(&draft))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(HttpResponse::Created().json(OwnerRead::from(owner)))
}

/// List owners.
#[utoipa::path(
    get,
    path = "/owners",
    params(
        ("offset" = Option<i64>, Query, description = "Number of records to skip"),
        ("limit" = Option<i64>, Query, description = "Page size, capped at 100")
    ),
    responses(
        (status = 200, description = "Owners", body = [OwnerRead])
    ),
    tags = ["owners"],
    operation_id = "listOwners"
)]
#[get("/owners")]
pub async fn list_owners(
    state: web::Data<HttpState>,
    query: web::Query<PageParams>,
) -> ApiResult<web::Json<Vec<OwnerRead>>> {
    let page = query.into_inner();
    let repo = state.owners.clone();
    let owners = web::block(move || repo.list(page))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(owners.into_iter().map(OwnerRead::from).collect()))
}

/// Fetch an owner together with their managers.
#[utoipa::path(
    get,
    path = "/owners/{owner_id}",
    params(("owner_id" = i32, Path, description = "Owner identifier")),
    responses(
        (status = 200, description = "Owner with managers", body = OwnerWithManagers),
        (status = 404, description = "Owner not found", body = ApiError)
    ),
    tags = ["owners"],
    operation_id = "getOwner"
)]
#[get("/owners/{owner_id}")]
pub async fn get_owner(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<OwnerWithManagers>> {
    let id = path.into_inner();
    let repo = state.owners.clone();
    let (owner, managers) = web::block(move || repo.find_with_managers(id))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(OwnerWithManagers {
        owner: owner.into(),
        managers: managers.into_iter().map(ManagerRead::from).collect(),
    }))
}

/// Apply a partial update to an owner.
#[utoipa::path(
    patch,
    path = "/owners/{owner_id}",
    params(("owner_id" = i32, Path, description = "Owner identifier")),
    request_body = OwnerUpdate,
    responses(
        (status = 200, description = "Updated owner", body = OwnerRead),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Owner not found", body = ApiError)
    ),
    tags = ["owners"],
    operation_id = "updateOwner"
)]
#[patch("/owners/{owner_id}")]
pub async fn update_owner(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<OwnerUpdate>,
) -> ApiResult<web::Json<OwnerRead>> {
    let id = path.into_inner();
    let payload = payload.into_inner();
    let patch = OwnerPatch::parse(
        payload.name.as_deref(),
        payload.email.as_deref(),
        payload.role,
    )?;
    if let Some(email) = &patch.email {
        ensure_email_deliverable(state.mx.as_ref(), email).await?;
    }

    let repo = state.owners.clone();
    let owner = web::block(move || repo.update(id, &patch))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(owner.into()))
}

/// Delete an owner, returning the removed record.
#[utoipa::path(
    delete,
    path = "/owners/{owner_id}",
    params(("owner_id" = i32, Path, description = "Owner identifier")),
    responses(
        (status = 200, description = "Deleted owner", body = OwnerRead),
        (status = 404, description = "Owner not found", body = ApiError),
        (status = 409, description = "Owner still has dependent records", body = ApiError)
    ),
    tags = ["owners"],
    operation_id = "deleteOwner"
)]
#[delete("/owners/{owner_id}")]
pub async fn delete_owner(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<OwnerRead>> {
    let id = path.into_inner();
    let repo = state.owners.clone();
    let owner = web::block(move || repo.delete(id))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_delete_error(err, ENTITY))?;

    Ok(web::Json(owner.into()))
}
