//! JSON file storage backend.
//!
//! Persists the whole [`GardenData`] document to a single file, rewriting it
//! on every mutation. Writes go to a temporary sibling first and are renamed
//! into place so a crash mid-write cannot leave a half-written document.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::models::{GrowthEntry, GrowthStage, MaintenanceTask, PlantSystemPair};
use crate::store::{GardenData, GardenStore, StoreError};

/// A [`GardenStore`] backed by a single JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

/// Return the default data file path.
///
/// Always uses XDG layout: `$XDG_DATA_HOME/sprout/garden.json` or
/// `~/.local/share/sprout/garden.json`.
pub fn default_data_path() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join("sprout").join("garden.json");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".local")
        .join("share")
        .join("sprout")
        .join("garden.json")
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current document. A missing file is an empty garden.
    fn read_data(&self) -> Result<GardenData, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(GardenData::default());
            }
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Serialize and atomically replace the document on disk.
    fn write_data(&self, data: &GardenData) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let contents =
            serde_json::to_string_pretty(data).expect("garden data is always serializable");
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, &contents).map_err(write_err)?;
        std::fs::rename(&tmp, &self.path).map_err(write_err)?;

        debug!(path = %self.path.display(), bytes = contents.len(), "wrote garden data");
        Ok(())
    }

    fn update<F>(&self, mutate: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut GardenData),
    {
        let mut data = self.read_data()?;
        mutate(&mut data);
        self.write_data(&data)
    }
}

#[async_trait]
impl GardenStore for JsonFileStore {
    async fn list_pairs(&self) -> Result<Vec<PlantSystemPair>, StoreError> {
        Ok(self.read_data()?.pairs)
    }

    async fn replace_pairs(&self, pairs: &[PlantSystemPair]) -> Result<(), StoreError> {
        self.update(|data| data.pairs = pairs.to_vec())
    }

    async fn list_tasks(&self) -> Result<Vec<MaintenanceTask>, StoreError> {
        Ok(self.read_data()?.tasks)
    }

    async fn replace_tasks(&self, tasks: &[MaintenanceTask]) -> Result<(), StoreError> {
        self.update(|data| data.tasks = tasks.to_vec())
    }

    async fn get_stage(&self, plant: &str) -> Result<Option<GrowthStage>, StoreError> {
        Ok(self.read_data()?.stages.get(plant).copied())
    }

    async fn put_stage(&self, plant: &str, stage: GrowthStage) -> Result<(), StoreError> {
        self.update(|data| {
            data.stages.insert(plant.to_owned(), stage);
        })
    }

    async fn list_stages(&self) -> Result<BTreeMap<String, GrowthStage>, StoreError> {
        Ok(self.read_data()?.stages)
    }

    async fn list_entries(&self) -> Result<Vec<GrowthEntry>, StoreError> {
        Ok(self.read_data()?.entries)
    }

    async fn put_entry(&self, entry: &GrowthEntry) -> Result<(), StoreError> {
        self.update(|data| {
            match data.entries.iter_mut().find(|e| e.id == entry.id) {
                Some(existing) => *existing = entry.clone(),
                None => data.entries.push(entry.clone()),
            }
        })
    }

    async fn delete_entry(&self, id: Uuid) -> Result<(), StoreError> {
        self.update(|data| data.entries.retain(|e| e.id != id))
    }
}
