//! OpenAPI schema aggregation for the owner/pet API.
//!
//! # Purpose
//! Collects all routes and schema types into a single OpenAPI document served
//! at `/openapi.json` and rendered by Swagger UI at `/docs`.
use crate::api::{
    owners, pets, system,
    types::{ErrorResponse, HealthStatus, RootMessage},
};
use crate::model::{
    OwnerCreateRequest, OwnerPatchRequest, OwnerView, Pet, PetCreateRequest, PetPatchRequest,
    PetSummary,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Owner/Pet API",
        version = "0.1.0",
        description = "Demo CRUD API for owners and their pets"
    ),
    paths(
        system::health,
        system::root,
        owners::create_owner,
        owners::list_owners,
        owners::get_owner,
        owners::patch_owner,
        owners::replace_owner,
        owners::delete_owner,
        pets::create_pet,
        pets::list_pets,
        pets::get_pet,
        pets::patch_pet,
        pets::replace_pet,
        pets::delete_pet
    ),
    components(schemas(
        ErrorResponse,
        HealthStatus,
        RootMessage,
        OwnerView,
        OwnerCreateRequest,
        OwnerPatchRequest,
        Pet,
        PetSummary,
        PetCreateRequest,
        PetPatchRequest
    )),
    tags(
        (name = "health", description = "Liveness and discovery"),
        (name = "owners", description = "Owner management"),
        (name = "pets", description = "Pet management")
    )
)]
pub struct ApiDoc;
