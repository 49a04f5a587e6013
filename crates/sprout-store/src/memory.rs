//! In-memory storage backend.
//!
//! Holds a [`GardenData`] behind a mutex. Used as the test fake for anything
//! that takes a [`GardenStore`], and as the ephemeral backend when no data
//! file is wanted.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{GrowthEntry, GrowthStage, MaintenanceTask, PlantSystemPair};
use crate::store::{GardenData, GardenStore, StoreError};

/// An in-memory [`GardenStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<GardenData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with the given data.
    pub fn with_data(data: GardenData) -> Self {
        Self {
            inner: Mutex::new(data),
        }
    }

    /// Clone out the current state. Test helper.
    pub fn snapshot(&self) -> GardenData {
        self.inner.lock().expect("memory store poisoned").clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GardenData> {
        self.inner.lock().expect("memory store poisoned")
    }
}

#[async_trait]
impl GardenStore for MemoryStore {
    async fn list_pairs(&self) -> Result<Vec<PlantSystemPair>, StoreError> {
        Ok(self.lock().pairs.clone())
    }

    async fn replace_pairs(&self, pairs: &[PlantSystemPair]) -> Result<(), StoreError> {
        self.lock().pairs = pairs.to_vec();
        Ok(())
    }

    async fn list_tasks(&self) -> Result<Vec<MaintenanceTask>, StoreError> {
        Ok(self.lock().tasks.clone())
    }

    async fn replace_tasks(&self, tasks: &[MaintenanceTask]) -> Result<(), StoreError> {
        self.lock().tasks = tasks.to_vec();
        Ok(())
    }

    async fn get_stage(&self, plant: &str) -> Result<Option<GrowthStage>, StoreError> {
        Ok(self.lock().stages.get(plant).copied())
    }

    async fn put_stage(&self, plant: &str, stage: GrowthStage) -> Result<(), StoreError> {
        self.lock().stages.insert(plant.to_owned(), stage);
        Ok(())
    }

    async fn list_stages(&self) -> Result<BTreeMap<String, GrowthStage>, StoreError> {
        Ok(self.lock().stages.clone())
    }

    async fn list_entries(&self) -> Result<Vec<GrowthEntry>, StoreError> {
        Ok(self.lock().entries.clone())
    }

    async fn put_entry(&self, entry: &GrowthEntry) -> Result<(), StoreError> {
        let mut data = self.lock();
        match data.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry.clone(),
            None => data.entries.push(entry.clone()),
        }
        Ok(())
    }

    async fn delete_entry(&self, id: Uuid) -> Result<(), StoreError> {
        self.lock().entries.retain(|e| e.id != id);
        Ok(())
    }
}
