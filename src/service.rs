//! Per-model service wiring the pipeline together
//!
//! A [`ModelService`] owns one schema, one store and the evaluator chain, and
//! enforces the evaluate-then-persist ordering for creates and updates. Route
//! handlers call straight into it and turn [`ModelError`] into an HTTP
//! response at the boundary.

use crate::core::error::{ModelError, StorageError};
use crate::evaluate::{
    AtomicIntegrityEvaluator, DefaultObjectEvaluator, DefaultObjectUpdateEvaluator,
    IntegrityEvaluator, ObjectEvaluator, ObjectUpdateEvaluator,
};
use crate::schema::Schema;
use crate::storage::ModelStore;
use serde_json::Value;
use std::sync::Arc;

/// The create/update entry point for one registered model
pub struct ModelService {
    schema: Arc<Schema>,
    store: Arc<dyn ModelStore>,
    evaluators: Vec<Box<dyn ObjectEvaluator>>,
    update_evaluator: Box<dyn ObjectUpdateEvaluator>,
}

impl ModelService {
    /// Wire a schema to a store with the default evaluator chain
    pub fn new(schema: Schema, store: Arc<dyn ModelStore>) -> Self {
        Self {
            schema: Arc::new(schema),
            store,
            evaluators: vec![Box::new(DefaultObjectEvaluator)],
            update_evaluator: Box::new(DefaultObjectUpdateEvaluator),
        }
    }

    /// Add an extra evaluator to the chain, after the default one
    pub fn with_evaluator(mut self, evaluator: Box<dyn ObjectEvaluator>) -> Self {
        self.evaluators.push(evaluator);
        self
    }

    /// The model's schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    fn evaluate(&self, item: &Value) -> Result<(), ModelError> {
        for evaluator in &self.evaluators {
            evaluator.evaluate(item, &self.schema)?;
        }
        Ok(())
    }

    /// Validate and persist one new item
    pub async fn create(&self, mut item: Value) -> Result<Value, ModelError> {
        self.evaluate(&item)?;
        self.schema
            .identity()
            .provide_id(&mut item, &self.schema, self.store.as_ref())
            .await?;
        IntegrityEvaluator
            .evaluate(&item, &self.schema, self.store.as_ref())
            .await?;

        tracing::debug!(model = %self.schema.name(), "validated create");
        self.store.create(item).await.map_err(ModelError::storage)
    }

    /// Validate and persist a batch of new items atomically
    ///
    /// The batch check runs before any element is evaluated or persisted, so
    /// an in-batch duplicate aborts the whole request with no partial writes.
    pub async fn create_many(&self, mut items: Vec<Value>) -> Result<Vec<Value>, ModelError> {
        AtomicIntegrityEvaluator.evaluate(&items, &self.schema)?;

        for item in &mut items {
            self.evaluate(item)?;
            self.schema
                .identity()
                .provide_id(item, &self.schema, self.store.as_ref())
                .await?;
            IntegrityEvaluator
                .evaluate(item, &self.schema, self.store.as_ref())
                .await?;
        }

        tracing::debug!(
            model = %self.schema.name(),
            count = items.len(),
            "validated batch create"
        );
        self.store
            .create_many(items)
            .await
            .map_err(ModelError::storage)
    }

    /// Validate and persist an update to an existing item
    pub async fn update(&self, id: &Value, mut item: Value) -> Result<Value, ModelError> {
        let before = self
            .store
            .get(id)
            .await
            .map_err(ModelError::storage)?
            .ok_or_else(|| StorageError::NotFound {
                id: id.to_string(),
            })?;

        // PUT semantics: the path identifier wins over whatever the body says.
        let id_name = self.schema.identifier().name.clone();
        if let Value::Object(map) = &mut item {
            map.insert(id_name, id.clone());
        }

        self.evaluate(&item)?;
        self.update_evaluator
            .evaluate(&before, &item, &self.schema)?;
        IntegrityEvaluator
            .evaluate(&item, &self.schema, self.store.as_ref())
            .await?;

        tracing::debug!(model = %self.schema.name(), "validated update");
        self.store
            .update(id, item)
            .await
            .map_err(ModelError::storage)
    }

    /// Fetch one item by identifier
    pub async fn find(&self, id: &Value) -> Result<Value, ModelError> {
        self.store
            .get(id)
            .await
            .map_err(ModelError::storage)?
            .ok_or_else(|| {
                StorageError::NotFound {
                    id: id.to_string(),
                }
                .into()
            })
    }

    /// Fetch all items
    pub async fn find_all(&self) -> Result<Vec<Value>, ModelError> {
        self.store.list().await.map_err(ModelError::storage)
    }

    /// Delete one item by identifier
    pub async fn delete(&self, id: &Value) -> Result<(), ModelError> {
        self.store.delete(id).await.map_err(ModelError::storage)
    }
}
