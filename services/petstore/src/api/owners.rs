//! Owner API handlers.
//!
//! # Purpose
//! Implements owner create/list/get/patch/delete. Every response joins the
//! owner with the live pet table, so `pets` is never stale.
use crate::api::error::{ApiError, api_internal, api_not_found, api_not_implemented};
use crate::api::extract::{IdPath, ValidatedJson};
use crate::app::AppState;
use crate::model::{Owner, OwnerCreateRequest, OwnerPatchRequest, OwnerView, now};
use crate::store::StoreError;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/owners",
    tag = "owners",
    request_body = OwnerCreateRequest,
    responses(
        (status = 201, description = "Owner created", body = OwnerView),
        (status = 422, description = "Payload failed validation", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_owner(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<OwnerCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let owner = Owner::new(Uuid::new_v4(), body, now());
    match state.store.create_owner(owner).await {
        Ok(created) => {
            tracing::info!(owner_id = %created.id, "owner created");
            Ok((StatusCode::CREATED, Json(OwnerView::project(created, &[]))))
        }
        Err(err) => Err(api_internal("failed to create owner", &err)),
    }
}

#[utoipa::path(
    get,
    path = "/owners",
    tag = "owners",
    responses(
        (status = 200, description = "List owners with their pets", body = [OwnerView])
    )
)]
pub(crate) async fn list_owners(
    State(state): State<AppState>,
) -> Result<Json<Vec<OwnerView>>, ApiError> {
    let owners = state
        .store
        .list_owners()
        .await
        .map_err(|err| api_internal("failed to list owners", &err))?;
    let pets = state
        .store
        .list_pets()
        .await
        .map_err(|err| api_internal("failed to list pets", &err))?;
    Ok(Json(
        owners
            .into_iter()
            .map(|owner| OwnerView::project(owner, &pets))
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/owners/{owner_id}",
    tag = "owners",
    params(
        ("owner_id" = Uuid, Path, description = "Owner ID")
    ),
    responses(
        (status = 200, description = "Fetch owner", body = OwnerView),
        (status = 404, description = "Owner not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_owner(
    IdPath(owner_id): IdPath,
    State(state): State<AppState>,
) -> Result<Json<OwnerView>, ApiError> {
    let owner = match state.store.get_owner(owner_id).await {
        Ok(owner) => owner,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("owner not found")),
        Err(err) => return Err(api_internal("failed to fetch owner", &err)),
    };
    view(&state, owner).await.map(Json)
}

#[utoipa::path(
    patch,
    path = "/owners/{owner_id}",
    tag = "owners",
    params(
        ("owner_id" = Uuid, Path, description = "Owner ID")
    ),
    request_body = OwnerPatchRequest,
    responses(
        (status = 200, description = "Owner updated", body = OwnerView),
        (status = 404, description = "Owner not found", body = crate::api::types::ErrorResponse),
        (status = 422, description = "Payload failed validation", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn patch_owner(
    IdPath(owner_id): IdPath,
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<OwnerPatchRequest>,
) -> Result<Json<OwnerView>, ApiError> {
    let updated = match state.store.patch_owner(owner_id, body, now()).await {
        Ok(updated) => updated,
        Err(StoreError::NotFound(_)) => return Err(api_not_found("owner not found")),
        Err(err) => return Err(api_internal("failed to update owner", &err)),
    };
    view(&state, updated).await.map(Json)
}

#[utoipa::path(
    put,
    path = "/owners/{owner_id}",
    tag = "owners",
    params(
        ("owner_id" = Uuid, Path, description = "Owner ID")
    ),
    responses(
        (status = 501, description = "Full replacement is not implemented", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn replace_owner() -> ApiError {
    api_not_implemented()
}

#[utoipa::path(
    delete,
    path = "/owners/{owner_id}",
    tag = "owners",
    params(
        ("owner_id" = Uuid, Path, description = "Owner ID")
    ),
    responses(
        (status = 204, description = "Owner and its pets deleted"),
        (status = 404, description = "Owner not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_owner(
    IdPath(owner_id): IdPath,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    match state.store.delete_owner(owner_id).await {
        Ok(()) => {
            tracing::info!(%owner_id, "owner deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(StoreError::NotFound(_)) => Err(api_not_found("owner not found")),
        Err(err) => Err(api_internal("failed to delete owner", &err)),
    }
}

async fn view(state: &AppState, owner: Owner) -> Result<OwnerView, ApiError> {
    let pets = state
        .store
        .list_pets_for_owner(owner.id)
        .await
        .map_err(|err| api_internal("failed to list pets", &err))?;
    Ok(OwnerView::project(owner, &pets))
}
