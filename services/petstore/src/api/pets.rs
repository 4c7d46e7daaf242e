//! Pet API handlers.
//!
//! # Purpose
//! Implements pet create/list/get/patch/delete. Creation rejects unknown
//! owners with 400; patches accept any `owner_id` unchecked.
use crate::api::error::{
    ApiError, api_internal, api_invalid_reference, api_not_found, api_not_implemented,
};
use crate::api::extract::{IdPath, ValidatedJson};
use crate::app::AppState;
use crate::model::{Pet, PetCreateRequest, PetPatchRequest, now};
use crate::store::StoreError;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/pets",
    tag = "pets",
    request_body = PetCreateRequest,
    responses(
        (status = 201, description = "Pet created", body = Pet),
        (status = 400, description = "owner_id does not exist", body = crate::api::types::ErrorResponse),
        (status = 422, description = "Payload failed validation", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_pet(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<PetCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pet = Pet::new(Uuid::new_v4(), body, now());
    match state.store.create_pet(pet).await {
        Ok(created) => {
            tracing::info!(pet_id = %created.id, owner_id = %created.owner_id, "pet created");
            Ok((StatusCode::CREATED, Json(created)))
        }
        Err(StoreError::InvalidReference(_)) => {
            Err(api_invalid_reference("owner_id does not exist"))
        }
        Err(err) => Err(api_internal("failed to create pet", &err)),
    }
}

#[utoipa::path(
    get,
    path = "/pets",
    tag = "pets",
    responses(
        (status = 200, description = "List pets", body = [Pet])
    )
)]
pub(crate) async fn list_pets(State(state): State<AppState>) -> Result<Json<Vec<Pet>>, ApiError> {
    let items = state
        .store
        .list_pets()
        .await
        .map_err(|err| api_internal("failed to list pets", &err))?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/pets/{pet_id}",
    tag = "pets",
    params(
        ("pet_id" = Uuid, Path, description = "Pet ID")
    ),
    responses(
        (status = 200, description = "Fetch pet", body = Pet),
        (status = 404, description = "Pet not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_pet(
    IdPath(pet_id): IdPath,
    State(state): State<AppState>,
) -> Result<Json<Pet>, ApiError> {
    match state.store.get_pet(pet_id).await {
        Ok(pet) => Ok(Json(pet)),
        Err(StoreError::NotFound(_)) => Err(api_not_found("pet not found")),
        Err(err) => Err(api_internal("failed to fetch pet", &err)),
    }
}

#[utoipa::path(
    patch,
    path = "/pets/{pet_id}",
    tag = "pets",
    params(
        ("pet_id" = Uuid, Path, description = "Pet ID")
    ),
    request_body = PetPatchRequest,
    responses(
        (status = 200, description = "Pet updated", body = Pet),
        (status = 404, description = "Pet not found", body = crate::api::types::ErrorResponse),
        (status = 422, description = "Payload failed validation", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn patch_pet(
    IdPath(pet_id): IdPath,
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<PetPatchRequest>,
) -> Result<Json<Pet>, ApiError> {
    match state.store.patch_pet(pet_id, body, now()).await {
        Ok(updated) => Ok(Json(updated)),
        Err(StoreError::NotFound(_)) => Err(api_not_found("pet not found")),
        Err(err) => Err(api_internal("failed to update pet", &err)),
    }
}

#[utoipa::path(
    put,
    path = "/pets/{pet_id}",
    tag = "pets",
    params(
        ("pet_id" = Uuid, Path, description = "Pet ID")
    ),
    responses(
        (status = 501, description = "Full replacement is not implemented", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn replace_pet() -> ApiError {
    api_not_implemented()
}

#[utoipa::path(
    delete,
    path = "/pets/{pet_id}",
    tag = "pets",
    params(
        ("pet_id" = Uuid, Path, description = "Pet ID")
    ),
    responses(
        (status = 204, description = "Pet deleted"),
        (status = 404, description = "Pet not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_pet(
    IdPath(pet_id): IdPath,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    match state.store.delete_pet(pet_id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(StoreError::NotFound(_)) => Err(api_not_found("pet not found")),
        Err(err) => Err(api_internal("failed to delete pet", &err)),
    }
}
