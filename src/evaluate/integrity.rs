//! Uniqueness enforcement, against persisted state and within a batch

use crate::core::error::{IntegrityError, ModelError};
use crate::schema::Schema;
use crate::storage::ModelStore;
use serde_json::Value;
use std::collections::HashSet;

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Per-item uniqueness check against the persisted collection
///
/// Identifier assignment must run before this check so the "is this the same
/// item" comparison always has both identifiers populated.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegrityEvaluator;

impl IntegrityEvaluator {
    pub async fn evaluate(
        &self,
        item: &Value,
        schema: &Schema,
        store: &dyn ModelStore,
    ) -> Result<(), ModelError> {
        let id_name = &schema.identifier().name;
        let own_id = item.get(id_name).unwrap_or(&Value::Null);

        for property in schema.unique_properties() {
            let candidate = item.get(&property.name).unwrap_or(&Value::Null);
            if candidate.is_null() {
                continue;
            }

            let matches = store
                .search(&property.name, candidate)
                .await
                .map_err(ModelError::storage)?;

            let collision = matches
                .iter()
                .any(|existing| existing.get(id_name).unwrap_or(&Value::Null) != own_id);
            if collision {
                return Err(IntegrityError::Duplicate {
                    property: property.pretty_name.clone(),
                    value: display_value(candidate),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Batch uniqueness check, run before any element of the batch is persisted
///
/// A duplicate anywhere in the batch aborts the whole batch, so a bulk create
/// never half-applies. A no-op for schemas without integrity rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomicIntegrityEvaluator;

impl AtomicIntegrityEvaluator {
    pub fn evaluate(&self, batch: &[Value], schema: &Schema) -> Result<(), ModelError> {
        if !schema.has_integrity_rules() {
            return Ok(());
        }

        for property in schema.unique_properties() {
            let mut seen = HashSet::with_capacity(batch.len());
            for item in batch {
                let value = item.get(&property.name).unwrap_or(&Value::Null);
                if value.is_null() {
                    continue;
                }
                if !seen.insert(value.to_string()) {
                    return Err(IntegrityError::Duplicate {
                        property: property.pretty_name.clone(),
                        value: display_value(value),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }
}
