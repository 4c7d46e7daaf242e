//! Pet records and request payloads.
//!
//! # Purpose
//! Defines the stored `Pet`, the create/patch payloads, and the `PetSummary`
//! shape embedded in owner responses.
//!
//! # Key invariants
//! - `owner_id` references an existing owner at creation time; the store
//!   enforces this, not the type.
//! - A patch may change `owner_id` without re-validating it.
use super::{advance, explicit, timestamp};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct Pet {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub birth_date: Option<NaiveDate>,
    #[serde(with = "timestamp")]
    #[schema(value_type = String, format = DateTime, example = "2025-01-15T10:20:30Z")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    #[schema(value_type = String, format = DateTime, example = "2025-01-16T12:00:00Z")]
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    pub fn new(id: Uuid, request: PetCreateRequest, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner_id: request.owner_id,
            name: request.name,
            species: request.species,
            breed: request.breed,
            birth_date: request.birth_date,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[schema(example = json!({
    "id": "550e8400-e29b-41d4-a716-446655440000",
    "name": "Boba",
    "species": "Cat"
}))]
pub struct PetSummary {
    pub id: Uuid,
    pub name: String,
    pub species: String,
}

impl From<&Pet> for PetSummary {
    fn from(pet: &Pet) -> Self {
        Self {
            id: pet.id,
            name: pet.name.clone(),
            species: pet.species.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate, Clone)]
#[schema(example = json!({
    "owner_id": "99999999-9999-4999-8999-999999999999",
    "name": "Boba",
    "species": "Cat"
}))]
pub struct PetCreateRequest {
    pub owner_id: Uuid,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "species must not be empty"))]
    pub species: String,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

/// Partial pet update; only supplied fields change.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate, Clone, Default)]
#[schema(example = json!({ "name": "Boba Fett" }))]
pub struct PetPatchRequest {
    pub owner_id: Option<Uuid>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "species must not be empty"))]
    pub species: Option<String>,
    #[serde(default, deserialize_with = "explicit", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub breed: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<Option<NaiveDate>>,
}

impl PetPatchRequest {
    /// Merge this patch into `pet`, returning the updated record.
    pub fn apply(&self, pet: &Pet, now: DateTime<Utc>) -> Pet {
        Pet {
            id: pet.id,
            owner_id: self.owner_id.unwrap_or(pet.owner_id),
            name: self.name.clone().unwrap_or_else(|| pet.name.clone()),
            species: self.species.clone().unwrap_or_else(|| pet.species.clone()),
            breed: self.breed.clone().unwrap_or_else(|| pet.breed.clone()),
            birth_date: self.birth_date.unwrap_or(pet.birth_date),
            created_at: pet.created_at,
            updated_at: advance(pet.updated_at, now),
        }
    }
}
