//! Repository abstraction for owners and pets.
//!
//! # Purpose
//! Defines the `RegistryStore` trait injected into HTTP handlers and the error
//! type every backend reports through.
//!
//! # Notes
//! Backends own referential checks (pet creation) and cascades (owner
//! deletion) so handlers never coordinate multiple mutations themselves.
use crate::model::{Owner, OwnerPatchRequest, Pet, PetPatchRequest};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("invalid reference: {0}")]
    InvalidReference(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// All owners in insertion order.
    async fn list_owners(&self) -> StoreResult<Vec<Owner>>;
    async fn get_owner(&self, id: Uuid) -> StoreResult<Owner>;
    async fn create_owner(&self, owner: Owner) -> StoreResult<Owner>;
    async fn patch_owner(
        &self,
        id: Uuid,
        patch: OwnerPatchRequest,
        now: DateTime<Utc>,
    ) -> StoreResult<Owner>;
    /// Remove the owner and every pet referencing it.
    async fn delete_owner(&self, id: Uuid) -> StoreResult<()>;

    /// All pets in insertion order.
    async fn list_pets(&self) -> StoreResult<Vec<Pet>>;
    async fn list_pets_for_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Pet>>;
    async fn get_pet(&self, id: Uuid) -> StoreResult<Pet>;
    /// Fails with `InvalidReference` when `pet.owner_id` names no owner.
    async fn create_pet(&self, pet: Pet) -> StoreResult<Pet>;
    async fn patch_pet(
        &self,
        id: Uuid,
        patch: PetPatchRequest,
        now: DateTime<Utc>,
    ) -> StoreResult<Pet>;
    async fn delete_pet(&self, id: Uuid) -> StoreResult<()>;

    async fn health_check(&self) -> StoreResult<()>;
    fn is_durable(&self) -> bool;
    fn backend_name(&self) -> &'static str;
}
