use async_trait::async_trait;

use super::domain::{NewPolyObject, PolyObject};
use crate::errors::ServiceError;

/// Storage abstraction for poly-data objects.
/// Implementations must serialize mutations so concurrent create/delete
/// calls never lose updates.
#[async_trait]
pub trait PolyRepository: Send + Sync {
    /// All objects in insertion order.
    async fn list(&self) -> Vec<PolyObject>;
    /// Store a new object under a fresh id.
    async fn create(&self, input: NewPolyObject) -> PolyObject;
    async fn get(&self, id: &str) -> Result<PolyObject, ServiceError>;
    /// Remove by id; returns whether it existed. Removing a missing id is not an error.
    async fn delete(&self, id: &str) -> bool;
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
