//! Field-level validation of an instance against its schema

use crate::core::error::{ModelError, ValidationError};
use crate::core::field::TextFormat;
use crate::schema::Schema;
use crate::schema::property::{EnumValue, Property, PropertyKind};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

/// A validation pass over a single deserialized instance
///
/// Implementations must be stateless and side-effect-free on success; route
/// handlers run every registered evaluator before touching persistence.
pub trait ObjectEvaluator: Send + Sync {
    fn evaluate(&self, instance: &Value, schema: &Schema) -> Result<(), ModelError>;
}

/// The default evaluator: enforces every declared constraint, depth-first
/// over the schema, short-circuiting on the first violation
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultObjectEvaluator;

impl ObjectEvaluator for DefaultObjectEvaluator {
    fn evaluate(&self, instance: &Value, schema: &Schema) -> Result<(), ModelError> {
        evaluate_properties(instance, schema.properties())
    }
}

fn evaluate_properties(instance: &Value, properties: &[Property]) -> Result<(), ModelError> {
    for property in properties {
        let value = instance.get(&property.name).unwrap_or(&Value::Null);
        check_property(value, property)?;
    }
    Ok(())
}

fn check_property(value: &Value, property: &Property) -> Result<(), ModelError> {
    check_required(value, property)?;
    check_kind(value, &property.kind, &property.pretty_name)
}

/// Read a value as a date: RFC 3339 strings and integer epoch-millis are
/// accepted, null reads as the epoch.
fn as_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Null => Some(DateTime::UNIX_EPOCH),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|d| d.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

fn check_required(value: &Value, property: &Property) -> Result<(), ModelError> {
    if !property.required {
        return Ok(());
    }

    // Null, the empty string, and near-epoch dates all count as "unset".
    let blank = match value {
        Value::Null => true,
        _ => {
            if matches!(property.kind, PropertyKind::Date { .. }) {
                as_datetime(value).is_some_and(|d| d.timestamp_millis() < 1000)
            } else {
                matches!(value, Value::String(s) if s.is_empty())
            }
        }
    };

    if blank {
        return Err(ValidationError::Required {
            property: property.pretty_name.clone(),
        }
        .into());
    }
    Ok(())
}

fn check_kind(value: &Value, kind: &PropertyKind, pretty: &str) -> Result<(), ModelError> {
    match kind {
        PropertyKind::Text {
            minimum_length,
            maximum_length,
            format,
            ..
        } => check_text(value, *minimum_length, *maximum_length, format.as_ref(), pretty),
        PropertyKind::Number {
            minimum, maximum, ..
        } => check_number(value, *minimum, *maximum, pretty),
        PropertyKind::Date { minimum, maximum } => check_date(value, *minimum, *maximum, pretty),
        PropertyKind::Enum { values } => check_enum(value, values, pretty),
        PropertyKind::Boolean => check_boolean(value, pretty),
        PropertyKind::Array {
            element,
            minimum_length,
            maximum_length,
        } => check_array(value, element, *minimum_length, *maximum_length, pretty),
        PropertyKind::Object { properties } => {
            // The nested shape is only descended into when a value is there;
            // required-ness of the object itself is check_required's job.
            if value.is_null() {
                Ok(())
            } else {
                evaluate_properties(value, properties)
            }
        }
    }
}

fn check_number(value: &Value, minimum: f64, maximum: f64, pretty: &str) -> Result<(), ModelError> {
    let number = match value {
        Value::Null => 0.0,
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        _ => {
            return Err(ValidationError::NotANumber {
                property: pretty.to_string(),
            }
            .into());
        }
    };

    if number < minimum || number > maximum {
        return Err(ValidationError::NumberOutOfRange {
            property: pretty.to_string(),
            minimum,
            maximum,
            value: number,
        }
        .into());
    }
    Ok(())
}

fn check_text(
    value: &Value,
    minimum_length: usize,
    maximum_length: usize,
    format: Option<&TextFormat>,
    pretty: &str,
) -> Result<(), ModelError> {
    let text = match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    let length = text.len();
    if length < minimum_length || length > maximum_length {
        return Err(ValidationError::TextLength {
            property: pretty.to_string(),
            minimum_length,
            maximum_length,
            length,
        }
        .into());
    }

    // Formats only apply to present values; required-ness handles absence.
    if let Some(format) = format
        && !text.is_empty()
        && !format.validate(&text)
    {
        return Err(ValidationError::InvalidFormat {
            property: pretty.to_string(),
            format: format.to_string(),
        }
        .into());
    }
    Ok(())
}

fn check_date(
    value: &Value,
    minimum: DateTime<Utc>,
    maximum: DateTime<Utc>,
    pretty: &str,
) -> Result<(), ModelError> {
    let Some(date) = as_datetime(value) else {
        return Err(ValidationError::NotADate {
            property: pretty.to_string(),
        }
        .into());
    };

    if date < minimum || date > maximum {
        return Err(ValidationError::DateOutOfRange {
            property: pretty.to_string(),
            minimum: minimum.to_rfc3339(),
            maximum: maximum.to_rfc3339(),
        }
        .into());
    }
    Ok(())
}

fn check_enum(value: &Value, values: &[EnumValue], pretty: &str) -> Result<(), ModelError> {
    let candidate = match value {
        Value::Null => return Ok(()),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    if !values.iter().any(|v| v.value == candidate) {
        return Err(ValidationError::NotInEnum {
            property: pretty.to_string(),
            value: candidate,
        }
        .into());
    }
    Ok(())
}

fn check_boolean(value: &Value, pretty: &str) -> Result<(), ModelError> {
    match value {
        Value::Null | Value::Bool(_) => Ok(()),
        _ => Err(ValidationError::NotABoolean {
            property: pretty.to_string(),
        }
        .into()),
    }
}

fn check_array(
    value: &Value,
    element: &PropertyKind,
    minimum_length: usize,
    maximum_length: usize,
    pretty: &str,
) -> Result<(), ModelError> {
    static EMPTY: Vec<Value> = Vec::new();
    let items = match value {
        Value::Null => &EMPTY,
        Value::Array(items) => items,
        _ => {
            return Err(ValidationError::NotAnArray {
                property: pretty.to_string(),
            }
            .into());
        }
    };

    if items.len() < minimum_length || items.len() > maximum_length {
        return Err(ValidationError::ArrayLength {
            property: pretty.to_string(),
            minimum_length,
            maximum_length,
            count: items.len(),
        }
        .into());
    }

    for item in items {
        check_kind(item, element, pretty)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ModelBuilder, PropertyBuilder};
    use serde_json::json;

    fn schema() -> Schema {
        ModelBuilder::new("Resource")
            .property(PropertyBuilder::number("id").identifier())
            .property(PropertyBuilder::text("requiredField").required())
            .property(
                PropertyBuilder::text("minLen10MaxLen50")
                    .minimum_length(10)
                    .maximum_length(50),
            )
            .property(PropertyBuilder::number("numberMin20").minimum(20.0))
            .property(
                PropertyBuilder::number("numberMin10Max50")
                    .minimum(10.0)
                    .maximum(50.0),
            )
            .build()
            .unwrap()
    }

    fn valid_instance() -> Value {
        json!({
            "id": 1,
            "requiredField": "filled in",
            "minLen10MaxLen50": "exactly thirty characters here",
            "numberMin20": 25,
            "numberMin10Max50": 30,
        })
    }

    fn evaluate(instance: &Value, schema: &Schema) -> Result<(), ModelError> {
        DefaultObjectEvaluator.evaluate(instance, schema)
    }

    #[test]
    fn test_valid_instance_passes() {
        assert!(evaluate(&valid_instance(), &schema()).is_ok());
    }

    #[test]
    fn test_required_field_null_fails() {
        let mut instance = valid_instance();
        instance["requiredField"] = Value::Null;
        let err = evaluate(&instance, &schema()).unwrap_err();
        assert!(err.to_string().contains("Required Field"));
        assert!(err.to_string().contains("blank"));
    }

    #[test]
    fn test_required_field_missing_fails() {
        let mut instance = valid_instance();
        instance.as_object_mut().unwrap().remove("requiredField");
        assert!(evaluate(&instance, &schema()).is_err());
    }

    #[test]
    fn test_required_field_empty_string_fails() {
        let mut instance = valid_instance();
        instance["requiredField"] = json!("");
        assert!(evaluate(&instance, &schema()).is_err());
    }

    #[test]
    fn test_text_too_short_names_property_and_bounds() {
        let mut instance = valid_instance();
        instance["minLen10MaxLen50"] = json!("short");
        let err = evaluate(&instance, &schema()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Min Len10 Max Len50"));
        assert!(message.contains("10"));
        assert!(message.contains("50"));
    }

    #[test]
    fn test_text_within_bounds_passes() {
        let mut instance = valid_instance();
        instance["minLen10MaxLen50"] = json!("exactly thirty characters here");
        assert!(evaluate(&instance, &schema()).is_ok());
    }

    #[test]
    fn test_text_boundary_lengths_pass() {
        let mut instance = valid_instance();
        instance["minLen10MaxLen50"] = json!("aaaaaaaaaa");
        assert!(evaluate(&instance, &schema()).is_ok());

        instance["minLen10MaxLen50"] = json!("a".repeat(50));
        assert!(evaluate(&instance, &schema()).is_ok());
    }

    #[test]
    fn test_number_below_minimum_fails() {
        let mut instance = valid_instance();
        instance["numberMin20"] = json!(15);
        assert!(evaluate(&instance, &schema()).is_err());
    }

    #[test]
    fn test_number_minimum_is_inclusive() {
        let mut instance = valid_instance();
        instance["numberMin20"] = json!(20);
        assert!(evaluate(&instance, &schema()).is_ok());
    }

    #[test]
    fn test_number_above_minimum_passes() {
        let mut instance = valid_instance();
        instance["numberMin20"] = json!(25);
        assert!(evaluate(&instance, &schema()).is_ok());
    }

    #[test]
    fn test_number_range_boundaries_inclusive() {
        let mut instance = valid_instance();
        instance["numberMin10Max50"] = json!(10);
        assert!(evaluate(&instance, &schema()).is_ok());
        instance["numberMin10Max50"] = json!(50);
        assert!(evaluate(&instance, &schema()).is_ok());
        instance["numberMin10Max50"] = json!(51);
        assert!(evaluate(&instance, &schema()).is_err());
    }

    #[test]
    fn test_number_null_reads_as_zero() {
        let mut instance = valid_instance();
        instance["numberMin20"] = Value::Null;
        // Zero is below the declared minimum of 20.
        assert!(evaluate(&instance, &schema()).is_err());
    }

    #[test]
    fn test_number_rejects_non_numeric_value() {
        let mut instance = valid_instance();
        instance["numberMin20"] = json!("twenty");
        let err = evaluate(&instance, &schema()).unwrap_err();
        assert!(err.to_string().contains("must be a number"));
    }

    #[test]
    fn test_date_range() {
        let schema = ModelBuilder::new("Event")
            .property(PropertyBuilder::number("id").identifier())
            .property(
                PropertyBuilder::date("happened")
                    .minimum_date("2020-01-01T00:00:00Z".parse().unwrap())
                    .maximum_date("2020-12-31T23:59:59Z".parse().unwrap()),
            )
            .build()
            .unwrap();

        let inside = json!({"id": 1, "happened": "2020-06-15T12:00:00Z"});
        assert!(evaluate(&inside, &schema).is_ok());

        let outside = json!({"id": 1, "happened": "2021-06-15T12:00:00Z"});
        let err = evaluate(&outside, &schema).unwrap_err();
        assert!(err.to_string().contains("Happened"));
    }

    #[test]
    fn test_required_date_near_epoch_is_blank() {
        let schema = ModelBuilder::new("Event")
            .property(PropertyBuilder::number("id").identifier())
            .property(PropertyBuilder::date("happened").required())
            .build()
            .unwrap();

        let unset = json!({"id": 1, "happened": "1970-01-01T00:00:00Z"});
        let err = evaluate(&unset, &schema).unwrap_err();
        assert!(err.to_string().contains("blank"));

        let set = json!({"id": 1, "happened": "2020-06-15T12:00:00Z"});
        assert!(evaluate(&set, &schema).is_ok());
    }

    #[test]
    fn test_date_accepts_epoch_millis() {
        let schema = ModelBuilder::new("Event")
            .property(PropertyBuilder::number("id").identifier())
            .property(PropertyBuilder::date("happened"))
            .build()
            .unwrap();

        let instance = json!({"id": 1, "happened": 1_592_222_400_000_i64});
        assert!(evaluate(&instance, &schema).is_ok());
    }

    #[test]
    fn test_enum_rejects_unknown_value() {
        let schema = ModelBuilder::new("Task")
            .property(PropertyBuilder::number("id").identifier())
            .property(PropertyBuilder::enumeration(
                "status",
                ["active", "inactive"],
            ))
            .build()
            .unwrap();

        assert!(evaluate(&json!({"id": 1, "status": "active"}), &schema).is_ok());
        assert!(evaluate(&json!({"id": 1, "status": null}), &schema).is_ok());

        let err = evaluate(&json!({"id": 1, "status": "gone"}), &schema).unwrap_err();
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_boolean_rejects_non_boolean() {
        let schema = ModelBuilder::new("Task")
            .property(PropertyBuilder::number("id").identifier())
            .property(PropertyBuilder::boolean("done"))
            .build()
            .unwrap();

        assert!(evaluate(&json!({"id": 1, "done": true}), &schema).is_ok());
        assert!(evaluate(&json!({"id": 1, "done": "yes"}), &schema).is_err());
    }

    #[test]
    fn test_text_format_applies_to_present_values() {
        let schema = ModelBuilder::new("Contact")
            .property(PropertyBuilder::number("id").identifier())
            .property(PropertyBuilder::text("email").format(TextFormat::Email))
            .build()
            .unwrap();

        assert!(evaluate(&json!({"id": 1, "email": "a@b.com"}), &schema).is_ok());
        assert!(evaluate(&json!({"id": 1, "email": null}), &schema).is_ok());

        let err = evaluate(&json!({"id": 1, "email": "nope"}), &schema).unwrap_err();
        assert!(err.to_string().contains("email address"));
    }

    fn array_schema() -> Schema {
        ModelBuilder::new("Box")
            .property(PropertyBuilder::number("id").identifier())
            .property(
                PropertyBuilder::array(
                    "scores",
                    PropertyKind::Number {
                        minimum: 0.0,
                        maximum: 100.0,
                        number_kind: crate::schema::NumberKind::Integer,
                    },
                )
                .minimum_length(1)
                .maximum_length(3),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_array_too_few_elements_fails() {
        let err = evaluate(&json!({"id": 1, "scores": []}), &array_schema()).unwrap_err();
        assert!(err.to_string().contains("between 1 and 3"));
    }

    #[test]
    fn test_array_within_bounds_passes() {
        assert!(evaluate(&json!({"id": 1, "scores": [10, 20]}), &array_schema()).is_ok());
    }

    #[test]
    fn test_array_element_violation_reports_element_error() {
        let err = evaluate(&json!({"id": 1, "scores": [10, 200]}), &array_schema()).unwrap_err();
        assert!(err.to_string().contains("between 0 and 100"));
    }

    #[test]
    fn test_array_rejects_non_array_value() {
        assert!(evaluate(&json!({"id": 1, "scores": "lots"}), &array_schema()).is_err());
    }

    #[test]
    fn test_nested_object_recursion() {
        let address = vec![
            PropertyBuilder::text("street").required().build().unwrap(),
            PropertyBuilder::text("zip")
                .minimum_length(4)
                .maximum_length(10)
                .build()
                .unwrap(),
        ];
        let schema = ModelBuilder::new("Person")
            .property(PropertyBuilder::number("id").identifier())
            .property(PropertyBuilder::object("address", address))
            .build()
            .unwrap();

        let valid = json!({"id": 1, "address": {"street": "Main", "zip": "12345"}});
        assert!(evaluate(&valid, &schema).is_ok());

        // Null nested objects are skipped entirely.
        let absent = json!({"id": 1, "address": null});
        assert!(evaluate(&absent, &schema).is_ok());

        let invalid = json!({"id": 1, "address": {"street": "", "zip": "12345"}});
        let err = evaluate(&invalid, &schema).unwrap_err();
        assert!(err.to_string().contains("Street"));
    }

    #[test]
    fn test_array_of_objects_recurses_per_element() {
        let line = vec![
            PropertyBuilder::text("sku").required().build().unwrap(),
            PropertyBuilder::number("qty").minimum(1.0).build().unwrap(),
        ];
        let schema = ModelBuilder::new("Order")
            .property(PropertyBuilder::number("id").identifier())
            .property(PropertyBuilder::array(
                "lines",
                PropertyKind::Object { properties: line },
            ))
            .build()
            .unwrap();

        let valid = json!({"id": 1, "lines": [{"sku": "A", "qty": 2}]});
        assert!(evaluate(&valid, &schema).is_ok());

        let invalid = json!({"id": 1, "lines": [{"sku": "A", "qty": 0}]});
        assert!(evaluate(&invalid, &schema).is_err());
    }
}
