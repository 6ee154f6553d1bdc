//! Trainer HTTP handlers.
//!
//! ```text
//! POST   /trainers
//! GET    /trainers
//! GET    /trainers/{trainer_id}
//! GET    /trainers/{trainer_id}/owner
//! GET    /trainers/{trainer_id}/manager
//! GET    /trainers/{trainer_id}/facility
//! PATCH  /trainers/{trainer_id}
//! DELETE /trainers/{trainer_id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use pagination::PageParams;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Role, Trainer, TrainerDraft, TrainerDraftInput, TrainerPatch,
    TrainerPatchInput};
use crate::inbound::http::error::{ApiError, ApiResult, map_delete_error, map_repo_error};
use crate::inbound::http::facilities::FacilityRead;
use crate::inbound::http::managers::ManagerRead;
use crate::inbound::http::owners::OwnerRead;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{double_option, ensure_email_deliverable};

const ENTITY: &str = "Trainer";

/// Request payload for creating a trainer.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TrainerCreate {
    pub name: String,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub role: Option<Role>,
    pub employment_date: Option<DateTime<Utc>>,
    pub owner_id: Option<i32>,
    pub manager_id: Option<i32>,
    pub facility_id: Option<i32>,
}

/// Trainer as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct TrainerRead {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub employment_date: DateTime<Utc>,
    pub owner_id: Option<i32>,
    pub manager_id: Option<i32>,
    pub facility_id: Option<i32>,
}

impl From<Trainer> for TrainerRead {
    fn from(value: Trainer) -> Self {
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
pub struct TrainerUpdate {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub bio: Option<Option<String>>,
    pub role: Option<Role>,
    pub employment_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "double_option")]
    pub owner_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub manager_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub facility_id: Option<Option<i32>>,
}

/// Trainer nested with their owner.
#[derive(Debug, Serialize, ToSchema)]
pub struct TrainerWithOwner {
    #[serde(flatten)]
    pub trainer: TrainerRead,
    pub owner: Option<OwnerRead>,
}

/// Trainer nested with their manager.
#[derive(Debug, Serialize, ToSchema)]
pub struct TrainerWithManager {
    #[serde(flatten)]
    pub trainer: TrainerRead,
    pub manager: Option<ManagerRead>,
}

/// Trainer nested with their facility.
#[derive(Debug, Serialize, ToSchema)]
pub struct TrainerWithFacility {
    #[serde(flatten)]
    pub trainer: TrainerRead,
    pub facility: Option<FacilityRead>,
}

/// Create a trainer.
#[utoipa::path(
    post,
    path = "/trainers",
    request_body = TrainerCreate,
    responses(
        (status = 201, description = "Trainer created", body = TrainerRead),
        (status = 400, description = "Validation failed", body = ApiError)
    ),
    tags = ["trainers"],
    operation_id = "createTrainer"
)]
#[post("/trainers")]
pub async fn create_trainer(
    state: web::Data<HttpState>,
    payload: web::Json<TrainerCreate>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let draft = TrainerDraft::parse(TrainerDraftInput {
        name: payload.name,
        email: payload.email,
        bio: payload.bio,
        role: payload.role,
        employment_date: payload.employment_date,
        owner_id: payload.owner_id,
        manager_id: payload.manager_id,
        facility_id: payload.facility_id,
    })?;
    if let Some(email) = &draft.email {
        ensure_email_deliverable(state.mx.as_ref(), email).await?;
    }

    let repo = state.trainers.clone();
    let trainer = web::block(move || repo.insert(&draft))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(HttpResponse::Created().json(TrainerRead::from(trainer)))
}

/// List trainers.
#[utoipa::path(
    get,
    path = "/trainers",
    params(
        ("offset" = Option<i64>, Query, description = "Number of records to skip"),
        ("limit" = Option<i64>, Query, description = "Page size, capped at 100")
    ),
    responses(
        (status = 200, description = "Trainers", body = [TrainerRead])
    ),
    tags = ["trainers"],
    operation_id = "listTrainers"
)]
#[get("/trainers")]
pub async fn list_trainers(
    state: web::Data<HttpState>,
    query: web::Query<PageParams>,
) -> ApiResult<web::Json<Vec<TrainerRead>>> {
    let page = query.into_inner();
    let repo = state.trainers.clone();
    let trainers = web::block(move || repo.list(page))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(
        trainers.into_iter().map(TrainerRead::from).collect(),
    ))
}

/// Fetch a trainer.
#[utoipa::path(
    get,
    path = "/trainers/{trainer_id}",
    params(("trainer_id" = i32, Path, description = "Trainer identifier")),
    responses(
        (status = 200, description = "Trainer", body = TrainerRead),
        (status = 404, description = "Trainer not found", body = ApiError)
    ),
    tags = ["trainers"],
    operation_id = "getTrainer"
)]
#[get("/trainers/{trainer_id}")]
pub async fn get_trainer(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<TrainerRead>> {
    let id = path.into_inner();
    let repo = state.trainers.clone();
    let trainer = web::block(move || repo.find(id))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(trainer.into()))
}

/// Fetch a trainer together with their owner.
#[utoipa::path(
    get,
    path = "/trainers/{trainer_id}/owner",
    params(("trainer_id" = i32, Path, description = "Trainer identifier")),
    responses(
        (status = 200, description = "Trainer with owner", body = TrainerWithOwner),
        (status = 404, description = "Trainer not found", body = ApiError)
    ),
    tags = ["trainers"],
    operation_id = "getTrainerWithOwner"
)]
#[get("/trainers/{trainer_id}/owner")]
pub async fn get_trainer_with_owner(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<TrainerWithOwner>> {
    let id = path.into_inner();
    let repo = state.trainers.clone();
    let (trainer, owner) = web::block(move || repo.find_with_owner(id))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(TrainerWithOwner {
        trainer: trainer.into(),
        owner: owner.map(OwnerRead::from),
    }))
}

/// Fetch a trainer together with their manager.
#[utoipa::path(
    get,
    path = "/trainers/{trainer_id}/manager",
    params(("trainer_id" = i32, Path, description = "Trainer identifier")),
    responses(
        (status = 200, description = "Trainer with manager", body = TrainerWithManager),
        (status = 404, description = "Trainer not found", body = ApiError)
    ),
    tags = ["trainers"],
    operation_id = "getTrainerWithManager"
)]
#[get("/trainers/{trainer_id}/manager")]
pub async fn get_trainer_with_manager(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<TrainerWithManager>> {
    let id = path.into_inner();
    let repo = state.trainers.clone();
    let (trainer, manager) = web::block(move || repo.find_with_manager(id))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(TrainerWithManager {
        trainer: trainer.into(),
        manager: manager.map(ManagerRead::from),
    }))
}

/// Fetch a trainer together with their facility.
#[utoipa::path(
    get,
    path = "/trainers/{trainer_id}/facility",
    params(("trainer_id" = i32, Path, description = "Trainer identifier")),
    responses(
        (status = 200, description = "Trainer with facility", body = TrainerWithFacility),
        (status = 404, description = "Trainer not found", body = ApiError)
    ),
    tags = ["trainers"],
    operation_id = "getTrainerWithFacility"
)]
#[get("/trainers/{trainer_id}/facility")]
pub async fn get_trainer_with_facility(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<TrainerWithFacility>> {
    let id = path.into_inner();
    let repo = state.trainers.clone();
    let (trainer, facility) = web::block(move || repo.find_with_facility(id))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(TrainerWithFacility {
        trainer: trainer.into(),
        facility: facility.map(FacilityRead::from),
    }))
}

/// Apply a partial update to a trainer.
#[utoipa::path(
    patch,
    path = "/trainers/{trainer_id}",
    params(("trainer_id" = i32, Path, description = "Trainer identifier")),
    request_body = TrainerUpdate,
    responses(
        (status = 200, description = "Updated trainer", body = TrainerRead),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Trainer not found", body = ApiError)
    ),
    tags = ["trainers"],
    operation_id = "updateTrainer"
)]
#[patch("/trainers/{trainer_id}")]
pub async fn update_trainer(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<TrainerUpdate>,
) -> ApiResult<web::Json<TrainerRead>> {
    let id = path.into_inner();
    let payload = payload.into_inner();
    let patch = TrainerPatch::parse(TrainerPatchInput {
        name: payload.name,
        email: payload.email,
        bio: payload.bio,
        role: payload.role,
        employment_date: payload.employment_date,
        owner_id: payload.owner_id,
        manager_id: payload.manager_id,
        facility_id: payload.facility_id,
    })?;
    if let Some(Some(email)) = &patch.email {
        ensure_email_deliverable(state.mx.as_ref(), email).await?;
    }

    let repo = state.trainers.clone();
    let trainer = web::block(move || repo.update(id, &patch))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_repo_error(err, ENTITY))?;

    Ok(web::Json(trainer.into()))
}

/// Delete a trainer, returning the removed record.
#[utoipa::path(
    delete,
    path = "/trainers/{trainer_id}",
    params(("trainer_id" = i32, Path, description = "Trainer identifier")),
    responses(
        (status = 200, description = "Deleted trainer", body = TrainerRead),
        (status = 404, description = "Trainer not found", body = ApiError)
    ),
    tags = ["trainers"],
    operation_id = "deleteTrainer"
)]
#[delete("/trainers/{trainer_id}")]
pub async fn delete_trainer(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<TrainerRead>> {
    let id = path.into_inner();
    let repo = state.trainers.clone();
    let trainer = web::block(move || repo.delete(id))
        .await
        .map_err(ApiError::from_blocking)?
        .map_err(|err| map_delete_error(err, ENTITY))?;

    Ok(web::Json(trainer.into()))
}
