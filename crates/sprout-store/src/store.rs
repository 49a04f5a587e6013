//! The `GardenStore` port -- the storage interface the core depends on.
//!
//! Backends store whole records keyed by pairing id, task id, or plant name.
//! The pairing sequence is ordered (the ledger's insertion order is
//! meaningful), so pairings and their derived tasks are replaced as a whole
//! sequence rather than patched row by row.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{GrowthEntry, GrowthStage, MaintenanceTask, PlantSystemPair};

/// Errors from a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read store file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write store file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("store file {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The full persisted state of a garden.
///
/// Doubles as the on-disk JSON document for [`crate::json::JsonFileStore`]
/// and the in-memory state of [`crate::memory::MemoryStore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GardenData {
    #[serde(default)]
    pub pairs: Vec<PlantSystemPair>,
    #[serde(default)]
    pub tasks: Vec<MaintenanceTask>,
    /// Current growth stage per plant name.
    #[serde(default)]
    pub stages: BTreeMap<String, GrowthStage>,
    #[serde(default)]
    pub entries: Vec<GrowthEntry>,
}

/// Storage port for garden state.
///
/// Implementations may be purely in-memory or durable; the core treats them
/// identically. The trait is object-safe so services can hold a
/// `Box<dyn GardenStore>` when the backend is chosen at runtime.
#[async_trait]
pub trait GardenStore: Send + Sync {
    /// List all pairings in ledger order.
    async fn list_pairs(&self) -> Result<Vec<PlantSystemPair>, StoreError>;

    /// Replace the whole pairing sequence.
    async fn replace_pairs(&self, pairs: &[PlantSystemPair]) -> Result<(), StoreError>;

    /// List all derived maintenance tasks with their completion state.
    async fn list_tasks(&self) -> Result<Vec<MaintenanceTask>, StoreError>;

    /// Replace the derived task set.
    async fn replace_tasks(&self, tasks: &[MaintenanceTask]) -> Result<(), StoreError>;

    /// Fetch the recorded growth stage for a plant, if any.
    async fn get_stage(&self, plant: &str) -> Result<Option<GrowthStage>, StoreError>;

    /// Record the growth stage for a plant.
    async fn put_stage(&self, plant: &str, stage: GrowthStage) -> Result<(), StoreError>;

    /// List all recorded growth stages.
    async fn list_stages(&self) -> Result<BTreeMap<String, GrowthStage>, StoreError>;

    /// List all journal entries.
    async fn list_entries(&self) -> Result<Vec<GrowthEntry>, StoreError>;

    /// Insert or update a journal entry by id.
    async fn put_entry(&self, entry: &GrowthEntry) -> Result<(), StoreError>;

    /// Delete a journal entry by id. Deleting an absent id is a no-op.
    async fn delete_entry(&self, id: Uuid) -> Result<(), StoreError>;
}

// Compile-time assertion: GardenStore must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn GardenStore) {}
};

/// Shared handles delegate, so one backend can serve several owners.
#[async_trait]
impl<S: GardenStore + ?Sized> GardenStore for Arc<S> {
    async fn list_pairs(&self) -> Result<Vec<PlantSystemPair>, StoreError> {
        (**self).list_pairs().await
    }

    async fn replace_pairs(&self, pairs: &[PlantSystemPair]) -> Result<(), StoreError> {
        (**self).replace_pairs(pairs).await
    }

    async fn list_tasks(&self) -> Result<Vec<MaintenanceTask>, StoreError> {
        (**self).list_tasks().await
    }

    async fn replace_tasks(&self, tasks: &[MaintenanceTask]) -> Result<(), StoreError> {
        (**self).replace_tasks(tasks).await
    }

    async fn get_stage(&self, plant: &str) -> Result<Option<GrowthStage>, StoreError> {
        (**self).get_stage(plant).await
    }

    async fn put_stage(&self, plant: &str, stage: GrowthStage) -> Result<(), StoreError> {
        (**self).put_stage(plant, stage).await
    }

    async fn list_stages(&self) -> Result<BTreeMap<String, GrowthStage>, StoreError> {
        (**self).list_stages().await
    }

    async fn list_entries(&self) -> Result<Vec<GrowthEntry>, StoreError> {
        (**self).list_entries().await
    }

    async fn put_entry(&self, entry: &GrowthEntry) -> Result<(), StoreError> {
        (**self).put_entry(entry).await
    }

    async fn delete_entry(&self, id: Uuid) -> Result<(), StoreError> {
        (**self).delete_entry(id).await
    }
}
