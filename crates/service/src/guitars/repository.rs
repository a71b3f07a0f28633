use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::guitars::domain::{Guitar, GuitarInput};

/// Trait abstraction over the guitar collection, as consumed by the HTTP layer.
#[async_trait]
pub trait GuitarRepository: Send + Sync {
    async fn list(&self) -> Vec<Guitar>;
    async fn get(&self, id: u64) -> Option<Guitar>;
    async fn create(&self, input: GuitarInput) -> Result<Guitar, ServiceError>;
    async fn update(&self, id: u64, input: GuitarInput) -> Result<Guitar, ServiceError>;
    /// Remove a record and hand it back.
    async fn delete(&self, id: u64) -> Result<Guitar, ServiceError>;
    /// Discard in-memory state and re-read the backing document; returns the new count.
    async fn reload(&self) -> usize;
    /// Human-readable name of the backing document.
    fn source_name(&self) -> String;
}
