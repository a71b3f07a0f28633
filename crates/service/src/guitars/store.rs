use std::sync::Arc;

use async_trait::async_trait;
use configs::{OnLoadError, StorageConfig};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::errors::ServiceError;
use crate::guitars::domain::{Guitar, GuitarInput};
use crate::guitars::repository::GuitarRepository;
use crate::storage::json_array_file::JsonArrayFile;

/// The in-memory collection plus the id counter that goes with it.
#[derive(Debug)]
struct Inventory {
    guitars: Vec<Guitar>,
    next_id: u64,
}

impl Default for Inventory {
    fn default() -> Self {
        Self { guitars: Vec::new(), next_id: 1 }
    }
}

impl Inventory {
    fn from_stored(items: Vec<Map<String, Value>>) -> Self {
        let guitars: Vec<Guitar> = items
            .into_iter()
            .zip(1u64..)
            .map(|(stored, id)| Guitar::from_stored(id, stored))
            .collect();
        let next_id = guitars.iter().map(|g| g.id).max().unwrap_or(0) + 1;
        Self { guitars, next_id }
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.guitars.iter().position(|g| g.id == id)
    }
}

/// File-backed guitar collection.
///
/// Every successful mutation rewrites the whole backing file while still holding
/// the write lock, so saves land in the same order as the mutations they follow.
pub struct GuitarStore {
    inner: RwLock<Inventory>,
    file: JsonArrayFile,
    persist: bool,
    on_load_error: OnLoadError,
}

impl GuitarStore {
    /// Build the store and perform the initial load.
    pub async fn open(cfg: &StorageConfig) -> Arc<Self> {
        let store = Self {
            inner: RwLock::new(Inventory::default()),
            file: JsonArrayFile::new(cfg.data_file.clone()),
            persist: cfg.persist,
            on_load_error: cfg.on_load_error,
        };
        store.load().await;
        Arc::new(store)
    }

    pub fn is_persistent(&self) -> bool {
        self.persist
    }

    /// Replace the collection with the file contents; ids are 1-based positions.
    /// Failures are logged and handled per the configured [`OnLoadError`].
    pub async fn load(&self) -> usize {
        let mut inv = self.inner.write().await;
        match self.file.read::<Map<String, Value>>().await {
            Ok(items) => {
                *inv = Inventory::from_stored(items);
                info!(path = %self.file.path().display(), count = inv.guitars.len(), "loaded guitars");
            }
            Err(e) => {
                error!(path = %self.file.path().display(), error = %e, policy = ?self.on_load_error, "failed to load guitars");
                if self.on_load_error == OnLoadError::Empty {
                    *inv = Inventory::default();
                }
            }
        }
        inv.guitars.len()
    }

    /// Write the collection without ids. Errors are logged, never returned:
    /// the request that triggered the save has already succeeded in memory.
    async fn save(&self, inv: &Inventory) {
        if !self.persist {
            debug!(path = %self.file.path().display(), "persistence disabled; skipping save");
            return;
        }
        let stored: Vec<&Map<String, Value>> = inv.guitars.iter().map(|g| &g.attributes).collect();
        match self.file.write(&stored).await {
            Ok(()) => info!(path = %self.file.path().display(), count = stored.len(), "saved guitars"),
            Err(e) => error!(path = %self.file.path().display(), error = %e, "failed to save guitars; disk is behind memory"),
        }
    }

    pub async fn list(&self) -> Vec<Guitar> {
        self.inner.read().await.guitars.clone()
    }

    pub async fn get(&self, id: u64) -> Option<Guitar> {
        let inv = self.inner.read().await;
        inv.guitars.iter().find(|g| g.id == id).cloned()
    }

    pub async fn create(&self, input: GuitarInput) -> Result<Guitar, ServiceError> {
        input.validate_complete()?;
        let mut inv = self.inner.write().await;
        let guitar = Guitar { id: inv.next_id, attributes: input.into_attributes() };
        inv.next_id += 1;
        inv.guitars.push(guitar.clone());
        self.save(&inv).await;
        Ok(guitar)
    }

    pub async fn update(&self, id: u64, input: GuitarInput) -> Result<Guitar, ServiceError> {
        let mut inv = self.inner.write().await;
        let idx = inv.position(id).ok_or_else(|| ServiceError::not_found("Guitar"))?;
        input.apply_to(&mut inv.guitars[idx].attributes);
        let updated = inv.guitars[idx].clone();
        self.save(&inv).await;
        Ok(updated)
    }

    pub async fn delete(&self, id: u64) -> Result<Guitar, ServiceError> {
        let mut inv = self.inner.write().await;
        let idx = inv.position(id).ok_or_else(|| ServiceError::not_found("Guitar"))?;
        let removed = inv.guitars.remove(idx);
        self.save(&inv).await;
        Ok(removed)
    }
}

#[async_trait]
impl GuitarRepository for GuitarStore {
    async fn list(&self) -> Vec<Guitar> { self.list().await }
    async fn get(&self, id: u64) -> Option<Guitar> { self.get(id).await }
    async fn create(&self, input: GuitarInput) -> Result<Guitar, ServiceError> { self.create(input).await }
    async fn update(&self, id: u64, input: GuitarInput) -> Result<Guitar, ServiceError> { self.update(id, input).await }
    async fn delete(&self, id: u64) -> Result<Guitar, ServiceError> { self.delete(id).await }
    async fn reload(&self) -> usize { self.load().await }
    fn source_name(&self) -> String { self.file.display_name() }
}
