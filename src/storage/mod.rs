//! Persistence contract consumed by the validation pipeline
//!
//! The pipeline only ever talks to persistence through [`ModelStore`]; real
//! backends live behind this trait. [`InMemoryModelStore`] is provided for
//! tests and development.

pub mod in_memory;

pub use in_memory::InMemoryModelStore;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Generic CRUD over the instances of one model
///
/// Items are the deserialized payloads themselves; the store is agnostic to
/// the model's schema beyond knowing which field is the identifier.
#[async_trait]
pub trait ModelStore: Send + Sync {
    /// Persist a new item
    async fn create(&self, item: Value) -> Result<Value>;

    /// Persist a batch of new items
    async fn create_many(&self, items: Vec<Value>) -> Result<Vec<Value>>;

    /// Fetch an item by identifier
    async fn get(&self, id: &Value) -> Result<Option<Value>>;

    /// Fetch all items
    async fn list(&self) -> Result<Vec<Value>>;

    /// Replace an existing item
    async fn update(&self, id: &Value, item: Value) -> Result<Value>;

    /// Delete an item by identifier
    async fn delete(&self, id: &Value) -> Result<()>;

    /// Find items whose field equals the given value
    async fn search(&self, field: &str, value: &Value) -> Result<Vec<Value>>;
}
