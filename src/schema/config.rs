//! Property configs: the rule set for one constraint family
//!
//! Each config can be built two ways: directly from declarations (the builder
//! or a declarative definition) or rehydrated from an already-built
//! [`Property`]'s payload. Both paths produce value-equal constraint data, so
//! consumers never need to re-scan the original declarations.

use crate::core::error::SchemaError;
use crate::core::field::TextFormat;
use crate::schema::property::{
    EnumValue, NumberKind, Property, PropertyKind, TextKind, epoch, max_date,
};
use chrono::{DateTime, Utc};

/// Constraints of a text property
#[derive(Debug, Clone, PartialEq)]
pub struct TextConfig {
    pub text_kind: TextKind,
    pub minimum_length: usize,
    pub maximum_length: usize,
    pub format: Option<TextFormat>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            text_kind: TextKind::default(),
            minimum_length: 0,
            maximum_length: usize::MAX,
            format: None,
        }
    }
}

impl TextConfig {
    /// Rehydrate from a built property; fails when the property is not text
    pub fn of(property: &Property) -> Result<Self, SchemaError> {
        Self::from_kind(&property.kind).ok_or(SchemaError::KindMismatch {
            property: property.name.clone(),
            expected: "text",
        })
    }

    pub(crate) fn from_kind(kind: &PropertyKind) -> Option<Self> {
        match kind {
            PropertyKind::Text {
                text_kind,
                minimum_length,
                maximum_length,
                format,
            } => Some(Self {
                text_kind: *text_kind,
                minimum_length: *minimum_length,
                maximum_length: *maximum_length,
                format: format.clone(),
            }),
            _ => None,
        }
    }

    /// Write this config into a property, setting its type tag
    pub fn apply(self, property: &mut Property) {
        property.kind = PropertyKind::Text {
            text_kind: self.text_kind,
            minimum_length: self.minimum_length,
            maximum_length: self.maximum_length,
            format: self.format,
        };
    }
}

/// Constraints of a number property
///
/// All three fields are always populated; `f64::MIN`/`f64::MAX` stand in for
/// undeclared bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberConfig {
    pub minimum: f64,
    pub maximum: f64,
    pub number_kind: NumberKind,
}

impl Default for NumberConfig {
    fn default() -> Self {
        Self {
            minimum: f64::MIN,
            maximum: f64::MAX,
            number_kind: NumberKind::default(),
        }
    }
}

impl NumberConfig {
    pub fn of(property: &Property) -> Result<Self, SchemaError> {
        Self::from_kind(&property.kind).ok_or(SchemaError::KindMismatch {
            property: property.name.clone(),
            expected: "number",
        })
    }

    pub(crate) fn from_kind(kind: &PropertyKind) -> Option<Self> {
        match kind {
            PropertyKind::Number {
                minimum,
                maximum,
                number_kind,
            } => Some(Self {
                minimum: *minimum,
                maximum: *maximum,
                number_kind: *number_kind,
            }),
            _ => None,
        }
    }

    pub fn apply(self, property: &mut Property) {
        property.kind = PropertyKind::Number {
            minimum: self.minimum,
            maximum: self.maximum,
            number_kind: self.number_kind,
        };
    }
}

/// Constraints of a date property
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateConfig {
    pub minimum: DateTime<Utc>,
    pub maximum: DateTime<Utc>,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            minimum: epoch(),
            maximum: max_date(),
        }
    }
}

impl DateConfig {
    pub fn of(property: &Property) -> Result<Self, SchemaError> {
        Self::from_kind(&property.kind).ok_or(SchemaError::KindMismatch {
            property: property.name.clone(),
            expected: "date",
        })
    }

    pub(crate) fn from_kind(kind: &PropertyKind) -> Option<Self> {
        match kind {
            PropertyKind::Date { minimum, maximum } => Some(Self {
                minimum: *minimum,
                maximum: *maximum,
            }),
            _ => None,
        }
    }

    pub fn apply(self, property: &mut Property) {
        property.kind = PropertyKind::Date {
            minimum: self.minimum,
            maximum: self.maximum,
        };
    }
}

/// Legal values of an enum property
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnumConfig {
    pub values: Vec<EnumValue>,
}

impl EnumConfig {
    pub fn of(property: &Property) -> Result<Self, SchemaError> {
        Self::from_kind(&property.kind).ok_or(SchemaError::KindMismatch {
            property: property.name.clone(),
            expected: "enum",
        })
    }

    pub(crate) fn from_kind(kind: &PropertyKind) -> Option<Self> {
        match kind {
            PropertyKind::Enum { values } => Some(Self {
                values: values.clone(),
            }),
            _ => None,
        }
    }

    pub fn apply(self, property: &mut Property) {
        property.kind = PropertyKind::Enum {
            values: self.values,
        };
    }
}

/// Element type and count bounds of an array property
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayConfig {
    pub element: PropertyKind,
    pub minimum_length: usize,
    pub maximum_length: usize,
}

impl ArrayConfig {
    /// Unbounded array of the given element kind
    pub fn of_element(element: PropertyKind) -> Self {
        Self {
            element,
            minimum_length: 0,
            maximum_length: usize::MAX,
        }
    }

    pub fn of(property: &Property) -> Result<Self, SchemaError> {
        Self::from_kind(&property.kind).ok_or(SchemaError::KindMismatch {
            property: property.name.clone(),
            expected: "array",
        })
    }

    pub(crate) fn from_kind(kind: &PropertyKind) -> Option<Self> {
        match kind {
            PropertyKind::Array {
                element,
                minimum_length,
                maximum_length,
            } => Some(Self {
                element: (**element).clone(),
                minimum_length: *minimum_length,
                maximum_length: *maximum_length,
            }),
            _ => None,
        }
    }

    pub fn apply(self, property: &mut Property) {
        property.kind = PropertyKind::Array {
            element: Box::new(self.element),
            minimum_length: self.minimum_length,
            maximum_length: self.maximum_length,
        };
    }
}

/// Nested shape of an object property
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectConfig {
    pub properties: Vec<Property>,
}

impl ObjectConfig {
    pub fn of(property: &Property) -> Result<Self, SchemaError> {
        Self::from_kind(&property.kind).ok_or(SchemaError::KindMismatch {
            property: property.name.clone(),
            expected: "object",
        })
    }

    pub(crate) fn from_kind(kind: &PropertyKind) -> Option<Self> {
        match kind {
            PropertyKind::Object { properties } => Some(Self {
                properties: properties.clone(),
            }),
            _ => None,
        }
    }

    pub fn apply(self, property: &mut Property) {
        property.kind = PropertyKind::Object {
            properties: self.properties,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_config_round_trip() {
        let config = NumberConfig {
            minimum: 10.0,
            maximum: 50.0,
            number_kind: NumberKind::Float,
        };
        let mut property = Property::new("price", "Price", PropertyKind::text());
        config.apply(&mut property);

        let rehydrated = NumberConfig::of(&property).expect("property is now a number");
        assert_eq!(rehydrated, config);
    }

    #[test]
    fn test_text_config_round_trip() {
        let config = TextConfig {
            text_kind: TextKind::Markdown,
            minimum_length: 10,
            maximum_length: 50,
            format: Some(TextFormat::Email),
        };
        let mut property = Property::new("bio", "Bio", PropertyKind::number());
        config.clone().apply(&mut property);

        let rehydrated = TextConfig::of(&property).expect("property is now text");
        assert_eq!(rehydrated, config);
    }

    #[test]
    fn test_date_config_round_trip() {
        let config = DateConfig::default();
        let mut property = Property::new("born", "Born", PropertyKind::text());
        config.apply(&mut property);

        let rehydrated = DateConfig::of(&property).expect("property is now a date");
        assert_eq!(rehydrated, config);
    }

    #[test]
    fn test_enum_config_round_trip() {
        let config = EnumConfig {
            values: vec![
                EnumValue::new("active", "Active"),
                EnumValue::new("inactive", "Inactive"),
            ],
        };
        let mut property = Property::new("status", "Status", PropertyKind::text());
        config.clone().apply(&mut property);

        let rehydrated = EnumConfig::of(&property).expect("property is now an enum");
        assert_eq!(rehydrated, config);
    }

    #[test]
    fn test_array_config_round_trip() {
        let config = ArrayConfig {
            element: PropertyKind::number(),
            minimum_length: 1,
            maximum_length: 3,
        };
        let mut property = Property::new("scores", "Scores", PropertyKind::text());
        config.clone().apply(&mut property);

        let rehydrated = ArrayConfig::of(&property).expect("property is now an array");
        assert_eq!(rehydrated, config);
    }

    #[test]
    fn test_rehydration_from_wrong_kind_fails() {
        let property = Property::new("name", "Name", PropertyKind::text());
        let err = NumberConfig::of(&property).unwrap_err();
        assert!(matches!(err, SchemaError::KindMismatch { .. }));
    }
}
