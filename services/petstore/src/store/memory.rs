//! In-memory implementation of the registry store.
//!
//! # Purpose
//! Implements `RegistryStore` with insertion-ordered tables guarded by
//! `tokio::sync::RwLock`. It is the only backend: all state is lost on
//! process restart.
//!
//! # Consistency
//! - Reads take read locks and may run concurrently.
//! - Mutations take write locks and are serialized per table.
//! - Locks are always acquired owners first, then pets. Owner deletion holds
//!   both write locks so the cascade is a single step, and pet creation holds
//!   the owner read lock while inserting so the reference check cannot race a
//!   concurrent owner delete.
//!
//! # Metrics
//! Table sizes are exported as gauges and every successful mutation bumps
//! `petstore_store_ops_total`.
use super::{RegistryStore, StoreError, StoreResult};
use crate::model::{Owner, OwnerPatchRequest, Pet, PetPatchRequest};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Rows keyed by id that remember insertion order.
///
/// Removal is linear in the table size, which is fine for a demo-sized store.
#[derive(Debug)]
struct Table<T> {
    rows: HashMap<Uuid, T>,
    order: Vec<Uuid>,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn contains(&self, id: &Uuid) -> bool {
        self.rows.contains_key(id)
    }

    fn get(&self, id: &Uuid) -> Option<&T> {
        self.rows.get(id)
    }

    /// Insert a new row; returns `false` without touching the table if the id is taken.
    fn insert(&mut self, id: Uuid, row: T) -> bool {
        if self.rows.contains_key(&id) {
            return false;
        }
        self.rows.insert(id, row);
        self.order.push(id);
        true
    }

    /// Overwrite an existing row in place, keeping its position.
    fn replace(&mut self, id: Uuid, row: T) {
        if let Some(slot) = self.rows.get_mut(&id) {
            *slot = row;
        }
    }

    fn remove(&mut self, id: &Uuid) -> Option<T> {
        let removed = self.rows.remove(id)?;
        self.order.retain(|existing| existing != id);
        Some(removed)
    }

    /// Remove every row matching `predicate`, returning how many were dropped.
    fn remove_where(&mut self, predicate: impl Fn(&T) -> bool) -> usize {
        let doomed: Vec<Uuid> = self
            .order
            .iter()
            .filter(|id| self.rows.get(*id).is_some_and(&predicate))
            .copied()
            .collect();
        for id in &doomed {
            self.rows.remove(id);
        }
        self.order.retain(|id| !doomed.contains(id));
        doomed.len()
    }

    fn values(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|id| self.rows.get(id))
    }
}

/// In-memory owner/pet store.
///
/// Cloning is cheap; clones share the same tables.
#[derive(Clone)]
pub struct InMemoryStore {
    /// Authoritative owners keyed by id.
    owners: Arc<RwLock<Table<Owner>>>,
    /// Authoritative pets keyed by id. Owners never cache their pets.
    pets: Arc<RwLock<Table<Pet>>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            owners: Arc::new(RwLock::new(Table::new())),
            pets: Arc::new(RwLock::new(Table::new())),
        }
    }
}

fn record_op(entity: &'static str, op: &'static str) {
    metrics::counter!("petstore_store_ops_total", "entity" => entity, "op" => op).increment(1);
}

#[async_trait]
impl RegistryStore for InMemoryStore {
    async fn list_owners(&self) -> StoreResult<Vec<Owner>> {
        Ok(self.owners.read().await.values().cloned().collect())
    }

    async fn get_owner(&self, id: Uuid) -> StoreResult<Owner> {
        self.owners
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("owner".into()))
    }

    async fn create_owner(&self, owner: Owner) -> StoreResult<Owner> {
        let mut owners = self.owners.write().await;
        if !owners.insert(owner.id, owner.clone()) {
            return Err(StoreError::Conflict("owner exists".into()));
        }
        metrics::gauge!("petstore_owners_total").set(owners.len() as f64);
        record_op("owner", "created");
        Ok(owner)
    }

    async fn patch_owner(
        &self,
        id: Uuid,
        patch: OwnerPatchRequest,
        now: DateTime<Utc>,
    ) -> StoreResult<Owner> {
        let mut owners = self.owners.write().await;
        let current = owners
            .get(&id)
            .ok_or_else(|| StoreError::NotFound("owner".into()))?;
        let updated = patch.apply(current, now);
        owners.replace(id, updated.clone());
        record_op("owner", "updated");
        Ok(updated)
    }

    async fn delete_owner(&self, id: Uuid) -> StoreResult<()> {
        let mut owners = self.owners.write().await;
        let mut pets = self.pets.write().await;
        if owners.remove(&id).is_none() {
            return Err(StoreError::NotFound("owner".into()));
        }
        // Cascade: the owner's pets go in the same critical section.
        let cascaded = pets.remove_where(|pet| pet.owner_id == id);
        tracing::debug!(owner_id = %id, cascaded, "owner deleted");
        metrics::gauge!("petstore_owners_total").set(owners.len() as f64);
        metrics::gauge!("petstore_pets_total").set(pets.len() as f64);
        record_op("owner", "deleted");
        Ok(())
    }

    async fn list_pets(&self) -> StoreResult<Vec<Pet>> {
        Ok(self.pets.read().await.values().cloned().collect())
    }

    async fn list_pets_for_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Pet>> {
        Ok(self
            .pets
            .read()
            .await
            .values()
            .filter(|pet| pet.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn get_pet(&self, id: Uuid) -> StoreResult<Pet> {
        self.pets
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("pet".into()))
    }

    async fn create_pet(&self, pet: Pet) -> StoreResult<Pet> {
        let owners = self.owners.read().await;
        if !owners.contains(&pet.owner_id) {
            return Err(StoreError::InvalidReference("owner_id".into()));
        }
        let mut pets = self.pets.write().await;
        if !pets.insert(pet.id, pet.clone()) {
            return Err(StoreError::Conflict("pet exists".into()));
        }
        metrics::gauge!("petstore_pets_total").set(pets.len() as f64);
        record_op("pet", "created");
        Ok(pet)
    }

    async fn patch_pet(
        &self,
        id: Uuid,
        patch: PetPatchRequest,
        now: DateTime<Utc>,
    ) -> StoreResult<Pet> {
        // `owner_id` changes are accepted as-is; only creation checks the reference.
        let mut pets = self.pets.write().await;
        let current = pets
            .get(&id)
            .ok_or_else(|| StoreError::NotFound("pet".into()))?;
        let updated = patch.apply(current, now);
        pets.replace(id, updated.clone());
        record_op("pet", "updated");
        Ok(updated)
    }

    async fn delete_pet(&self, id: Uuid) -> StoreResult<()> {
        let mut pets = self.pets.write().await;
        if pets.remove(&id).is_none() {
            return Err(StoreError::NotFound("pet".into()));
        }
        metrics::gauge!("petstore_pets_total").set(pets.len() as f64);
        record_op("pet", "deleted");
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        // Always healthy while the process is running.
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
