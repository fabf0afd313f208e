//! Identifier assignment strategies
//!
//! The strategy is chosen once when the schema is built, from the identifier
//! property's declared kind: text identifiers get random hexadecimal values,
//! numeric identifiers get the next unused integer relative to persisted
//! items. An identifier the caller already filled in is left untouched.

use crate::core::error::ModelError;
use crate::schema::Schema;
use crate::storage::ModelStore;
use serde_json::Value;
use uuid::Uuid;

/// Identity-assignment strategy stored on the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityStrategy {
    /// Random hexadecimal identifiers for text identifier properties
    Hex,
    /// Next unused integer for numeric identifier properties
    Sequential,
}

impl IdentityStrategy {
    /// Assign an identifier to `item` when it does not carry one yet
    pub async fn provide_id(
        &self,
        item: &mut Value,
        schema: &Schema,
        store: &dyn ModelStore,
    ) -> Result<(), ModelError> {
        let id_name = schema.identifier().name.clone();
        let current = item.get(&id_name).cloned().unwrap_or(Value::Null);

        match self {
            IdentityStrategy::Hex => {
                let unset = match &current {
                    Value::Null => true,
                    Value::String(s) => s.is_empty(),
                    _ => false,
                };
                if unset {
                    let id = Uuid::new_v4().simple().to_string();
                    set_field(item, &id_name, Value::String(id));
                }
            }
            IdentityStrategy::Sequential => {
                let unset = match &current {
                    Value::Null => true,
                    Value::Number(n) => n.as_i64() == Some(0),
                    _ => false,
                };
                if unset {
                    let items = store.list().await.map_err(ModelError::storage)?;
                    let next = 1 + items
                        .iter()
                        .filter_map(|existing| existing.get(&id_name))
                        .filter_map(Value::as_i64)
                        .max()
                        .unwrap_or(0);
                    set_field(item, &id_name, Value::from(next));
                }
            }
        }
        Ok(())
    }
}

fn set_field(item: &mut Value, name: &str, value: Value) {
    if let Value::Object(map) = item {
        map.insert(name.to_string(), value);
    }
}
