//! Owner records, request payloads, and the read-time projection.
//!
//! # Purpose
//! Defines the stored `Owner`, the create/patch payloads accepted by the API,
//! and `OwnerView`, which joins the owner with its pets at read time.
//!
//! # Key invariants
//! - `id` and `created_at` never change after creation.
//! - `updated_at >= created_at`.
//! - `pets` is never stored; it is recomputed from the pet table on every read.
use super::pet::{Pet, PetSummary};
use super::{advance, explicit, timestamp};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct Owner {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    #[serde(with = "timestamp")]
    #[schema(value_type = String, format = DateTime, example = "2025-01-15T10:20:30Z")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    #[schema(value_type = String, format = DateTime, example = "2025-01-16T12:00:00Z")]
    pub updated_at: DateTime<Utc>,
}

impl Owner {
    /// Build a fresh record from a create payload; both timestamps are `now`.
    pub fn new(id: Uuid, request: OwnerCreateRequest, now: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: request.first_name,
            last_name: request.last_name,
            phone: request.phone,
            email: request.email,
            birth_date: request.birth_date,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Owner as returned to clients, with its pets joined in.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct OwnerView {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub pets: Vec<PetSummary>,
    #[serde(with = "timestamp")]
    #[schema(value_type = String, format = DateTime, example = "2025-01-15T10:20:30Z")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    #[schema(value_type = String, format = DateTime, example = "2025-01-16T12:00:00Z")]
    pub updated_at: DateTime<Utc>,
}

impl OwnerView {
    /// Join an owner with every pet in `pets` that references it.
    ///
    /// Pet order follows the order of `pets`.
    pub fn project(owner: Owner, pets: &[Pet]) -> Self {
        let pets = pets
            .iter()
            .filter(|pet| pet.owner_id == owner.id)
            .map(PetSummary::from)
            .collect();
        Self {
            id: owner.id,
            first_name: owner.first_name,
            last_name: owner.last_name,
            phone: owner.phone,
            email: owner.email,
            birth_date: owner.birth_date,
            pets,
            created_at: owner.created_at,
            updated_at: owner.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate, Clone)]
#[schema(example = json!({
    "first_name": "Ada",
    "last_name": "Lovelace",
    "phone": "+1-212-555-0199",
    "email": "ada@example.com",
    "birth_date": "1815-12-10"
}))]
pub struct OwnerCreateRequest {
    #[validate(length(min = 1, message = "first_name must not be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name must not be empty"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "phone must not be empty"))]
    pub phone: String,
    #[serde(default)]
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

/// Partial owner update; only supplied fields change.
///
/// `email` and `birth_date` accept an explicit `null` to clear the value.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate, Clone, Default)]
#[schema(example = json!({ "first_name": "Ada", "last_name": "Byron" }))]
pub struct OwnerPatchRequest {
    #[validate(length(min = 1, message = "first_name must not be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "last_name must not be empty"))]
    pub last_name: Option<String>,
    #[validate(length(min = 1, message = "phone must not be empty"))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "explicit", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<Option<NaiveDate>>,
}

impl OwnerPatchRequest {
    /// Merge this patch into `owner`, returning the updated record.
    pub fn apply(&self, owner: &Owner, now: DateTime<Utc>) -> Owner {
        Owner {
            id: owner.id,
            first_name: self
                .first_name
                .clone()
                .unwrap_or_else(|| owner.first_name.clone()),
            last_name: self
                .last_name
                .clone()
                .unwrap_or_else(|| owner.last_name.clone()),
            phone: self.phone.clone().unwrap_or_else(|| owner.phone.clone()),
            email: self.email.clone().unwrap_or_else(|| owner.email.clone()),
            birth_date: self.birth_date.unwrap_or(owner.birth_date),
            created_at: owner.created_at,
            updated_at: advance(owner.updated_at, now),
        }
    }
}
