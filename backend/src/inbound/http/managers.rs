//! Manager HTTP handlers.
//!
//! ```text
//! POST   /managers
//! GET    /managers
//! GET    /managers/{manager_id}
//! PATCH  /managers/{manager_id}
//! DELETE /managers/{manager_id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use pagination::PageParams;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Manager, ManagerDraft, ManagerPatch, Role};
use crate::inbound::http::error::{ApiError, ApiResult, map_delete_error, map_repo_error};
use crate::inbound::http::owners::OwnerRead;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{double_option, ensure_email_deliverable};

const ENTITY: &str = "Manager";

/// Request payload for creating a manager.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ManagerCreate {
    pub name: String,
    pub email: String,
    pub role: Option<Role>,
    pub owner_id: Option<i32>,
}

/// Manager as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct ManagerRead {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub owner_id: Option<i32>,
}

impl From<Manager> for ManagerRead {
    fn from(value: Manager) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            role: value.role,
            created_at: value.created_at,
            owner_id: value.owner_id,
        }
    }
}

/// Partial update payload; absent fields are left untouched, an explicit
/// null `owner_id` detaches the manager from their owner.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ManagerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    #[serde(default, deserialize_with = "double_option")]
    pub owner_id: Option<Option<i32>>,
}

/// Manager nested with their owner.
#[derive(Debug, Serialize, ToSchema)]
pub struct ManagerWithOwner {
    #[serde(flatten)]
    pub manager: ManagerRead,
    pub owner: Option<OwnerRead>,
}

/// Create a manager.
#[utoipa::path(
    post,
    path = "/managers",
    request_body = ManagerCreate,
    responses(
        (status = 201, description = "Manager created", body = ManagerRead),
        (status = 400, description = "Validation failed", body = ApiError)
    ),
    tags = ["managers"],
    operation_id = "createManager"
)]
#[post("/managers")]
pub async fn create_manager(
    state: web::Data<HttpState>,
    payload: web::Json<ManagerCreate>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let draft = ManagerDraft::parse(
        &payload.name,
        &payload.email,
        payload.role,
        payload.owner_id,
    )?;
    ensure_email_deliverable(state.mx.as_ref(), &draft.email).await?;

    let repo = state.managers.clone();
    let manager = web::block(move || repo.insert(&draft))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(HttpResponse::Created().json(ManagerRead::from(manager)))
}

/// List managers.
#[utoipa::path(
    get,
    path = "/managers",
    params(
        ("offset" = Option<i64>, Query, description = "Number of records to skip"),
        ("limit" = Option<i64>, Query, description = "Page size, capped at 100")
    ),
    responses(
        (status = 200, description = "Managers", body = [ManagerRead])
    ),
    tags = ["managers"],
    operation_id = "listManagers"
)]
#[get("/managers")]
pub async fn list_managers(
    state: web::Data<HttpState>,
    query: web::Query<PageParams>,
) -> ApiResult<web::Json<Vec<ManagerRead>>> {
    let page = query.into_inner();
    let repo = state.managers.clone();
    let managers = web::block(move || repo.list(page))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(
        managers.into_iter().map(ManagerRead::from).collect(),
    ))
}

/// Fetch a manager together with their owner.
#[utoipa::path(
    get,
    path = "/managers/{manager_id}",
    params(("manager_id" = i32, Path, description = "Manager identifier")),
    responses(
        (status = 200, description = "Manager with owner", body = ManagerWithOwner),
        (status = 404, description = "Manager not found", body = ApiError)
    ),
    tags = ["managers"],
    operation_id = "getManager"
)]
#[get("/managers/{manager_id}")]
pub async fn get_manager(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<ManagerWithOwner>> {
    let id = path.into_inner();
    let repo = state.managers.clone();
    let (manager, owner) = web::block(move || repo.find_with_owner(id))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(ManagerWithOwner {
        manager: manager.into(),
        owner: owner.map(OwnerRead::from),
    }))
}

/// Apply a partial update to a manager.
#[utoipa::path(
    patch,
    path = "/managers/{manager_id}",
    params(("manager_id" = i32, Path, description = "Manager identifier")),
    request_body = ManagerUpdate,
    responses(
        (status = 200, description = "Updated manager", body = ManagerRead),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Manager not found", body = ApiError)
    ),
    tags = ["managers"],
    operation_id = "updateManager"
)]
#[patch("/managers/{manager_id}")]
pub async fn update_manager(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<ManagerUpdate>,
) -> ApiResult<web::Json<ManagerRead>> {
    let id = path.into_inner();
    let payload = payload.into_inner();
    let patch = ManagerPatch::parse(
        payload.name.as_deref(),
        payload.email.as_deref(),
        payload.role,
        payload.owner_id,
    )?;
    if let Some(email) = &patch.email {
        ensure_email_deliverable(state.mx.as_ref(), email).await?;
    }

    let repo = state.managers.clone();
    let manager = web::block(move || repo.update(id, &patch))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(manager.into()))
}

/// Delete a manager, returning the removed record.
#[utoipa::path(
    delete,
    path = "/managers/{manager_id}",
    params(("manager_id" = i32, Path, description = "Manager identifier")),
    responses(
        (status = 200, description = "Deleted manager", body = ManagerRead),
        (status = 404, description = "Manager not found", body = ApiError),
        (status = 409, description = "Manager still has dependent records", body = ApiError)
    ),
    tags = ["managers"],
    operation_id = "deleteManager"
)]
#[delete("/managers/{manager_id}")]
pub async fn delete_manager(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<ManagerRead>> {
    let id = path.into_inner();
    let repo = state.managers.clone();
    let manager = web::block(move || repo.delete(id))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_delete_error(err, ENTITY))?;

    Ok(web::Json(manager.into()))
}
