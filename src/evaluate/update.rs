//! Immutability checking between a persisted and an incoming instance

use crate::core::error::{ModelError, ValidationError};
use crate::schema::Schema;
use serde_json::Value;

/// A validation pass over an update's before/after pair
pub trait ObjectUpdateEvaluator: Send + Sync {
    fn evaluate(&self, before: &Value, after: &Value, schema: &Schema) -> Result<(), ModelError>;
}

/// The default update evaluator: rejects changes to non-editable properties
///
/// Values are compared structurally, so nested objects are checked
/// field-by-field for free. Field constraints are not re-checked here; the
/// object evaluator runs alongside this one on every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultObjectUpdateEvaluator;

impl ObjectUpdateEvaluator for DefaultObjectUpdateEvaluator {
    fn evaluate(&self, before: &Value, after: &Value, schema: &Schema) -> Result<(), ModelError> {
        for property in schema.non_editable_properties() {
            let old = before.get(&property.name).unwrap_or(&Value::Null);
            let new = after.get(&property.name).unwrap_or(&Value::Null);
            if old != new {
                return Err(ValidationError::Immutable {
                    property: property.pretty_name.clone(),
                }
                .into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ModelBuilder, PropertyBuilder};
    use serde_json::json;

    fn schema() -> Schema {
        ModelBuilder::new("Resource")
            .property(PropertyBuilder::number("id").identifier())
            .property(PropertyBuilder::text("name"))
            .property(PropertyBuilder::text("nonEditable").uneditable())
            .build()
            .unwrap()
    }

    fn evaluate(before: &Value, after: &Value) -> Result<(), ModelError> {
        DefaultObjectUpdateEvaluator.evaluate(before, after, &schema())
    }

    #[test]
    fn test_editable_change_passes() {
        let before = json!({"id": 1, "name": "a", "nonEditable": "A"});
        let after = json!({"id": 1, "name": "b", "nonEditable": "A"});
        assert!(evaluate(&before, &after).is_ok());
    }

    #[test]
    fn test_non_editable_change_fails() {
        let before = json!({"id": 1, "name": "a", "nonEditable": "A"});
        let after = json!({"id": 1, "name": "a", "nonEditable": "B"});
        let err = evaluate(&before, &after).unwrap_err();
        assert!(err.to_string().contains("Non Editable"));
        assert_eq!(err.error_code(), "IMMUTABLE_FIELD");
    }

    #[test]
    fn test_non_editable_unchanged_with_other_edits_passes() {
        let before = json!({"id": 1, "name": "a", "nonEditable": "same"});
        let after = json!({"id": 1, "name": "completely different", "nonEditable": "same"});
        assert!(evaluate(&before, &after).is_ok());
    }

    #[test]
    fn test_dropping_non_editable_value_fails() {
        let before = json!({"id": 1, "name": "a", "nonEditable": "A"});
        let after = json!({"id": 1, "name": "a"});
        assert!(evaluate(&before, &after).is_err());
    }

    #[test]
    fn test_nested_non_editable_compared_structurally() {
        let child = vec![PropertyBuilder::text("code").build().unwrap()];
        let schema = ModelBuilder::new("Thing")
            .property(PropertyBuilder::number("id").identifier())
            .property(PropertyBuilder::object("origin", child).uneditable())
            .build()
            .unwrap();

        let before = json!({"id": 1, "origin": {"code": "x"}});
        let same = json!({"id": 1, "origin": {"code": "x"}});
        let changed = json!({"id": 1, "origin": {"code": "y"}});

        assert!(
            DefaultObjectUpdateEvaluator
                .evaluate(&before, &same, &schema)
                .is_ok()
        );
        assert!(
            DefaultObjectUpdateEvaluator
                .evaluate(&before, &changed, &schema)
                .is_err()
        );
    }
}
