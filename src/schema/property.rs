//! Property definitions: one schema element per declared model field

use crate::core::field::TextFormat;
use chrono::{DateTime, Utc};

/// Rendering hint for text properties in an admin panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextKind {
    #[default]
    Field,
    Area,
    Markdown,
}

/// Declared numeric representation of a number property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberKind {
    #[default]
    Integer,
    Float,
}

/// One legal value of an enum property, with its display form
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub value: String,
    pub pretty_name: String,
}

impl EnumValue {
    pub fn new(value: impl Into<String>, pretty_name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            pretty_name: pretty_name.into(),
        }
    }
}

/// Tagged constraint payload, one variant per property type
///
/// The variant determines exactly which constraint data a property carries.
/// Number properties always hold all three of minimum, maximum and kind, with
/// `f64::MIN`/`f64::MAX` standing in for undeclared bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    Text {
        text_kind: TextKind,
        minimum_length: usize,
        maximum_length: usize,
        format: Option<TextFormat>,
    },
    Number {
        minimum: f64,
        maximum: f64,
        number_kind: NumberKind,
    },
    Date {
        minimum: DateTime<Utc>,
        maximum: DateTime<Utc>,
    },
    Enum {
        values: Vec<EnumValue>,
    },
    Array {
        element: Box<PropertyKind>,
        minimum_length: usize,
        maximum_length: usize,
    },
    Object {
        properties: Vec<Property>,
    },
    Boolean,
}

/// Latest representable date, used as the undeclared upper bound
pub fn max_date() -> DateTime<Utc> {
    DateTime::<Utc>::MAX_UTC
}

/// Epoch, used as the undeclared lower bound
pub fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl PropertyKind {
    /// Name of this kind, as used in error messages and definitions
    pub fn kind_name(&self) -> &'static str {
        match self {
            PropertyKind::Text { .. } => "text",
            PropertyKind::Number { .. } => "number",
            PropertyKind::Date { .. } => "date",
            PropertyKind::Enum { .. } => "enum",
            PropertyKind::Array { .. } => "array",
            PropertyKind::Object { .. } => "object",
            PropertyKind::Boolean => "boolean",
        }
    }

    /// An unconstrained text kind
    pub fn text() -> Self {
        PropertyKind::Text {
            text_kind: TextKind::default(),
            minimum_length: 0,
            maximum_length: usize::MAX,
            format: None,
        }
    }

    /// An unconstrained number kind
    pub fn number() -> Self {
        PropertyKind::Number {
            minimum: f64::MIN,
            maximum: f64::MAX,
            number_kind: NumberKind::default(),
        }
    }

    /// An unconstrained date kind
    pub fn date() -> Self {
        PropertyKind::Date {
            minimum: epoch(),
            maximum: max_date(),
        }
    }
}

/// A single named, typed schema element
///
/// Built once when the model's schema is derived; immutable and shared
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Field name as it appears in payloads
    pub name: String,
    /// Display name shown in error messages and the admin panel
    pub pretty_name: String,
    /// The value must be present and non-blank
    pub required: bool,
    /// The value may change across updates
    pub editable: bool,
    /// The value must be distinct across persisted items
    pub unique: bool,
    /// The field participates in text search
    pub searchable: bool,
    /// The field holds the model's identity
    pub identifier: bool,
    /// Type tag and constraint payload
    pub kind: PropertyKind,
}

impl Property {
    /// Create a property with default markers: optional, editable, not unique
    pub fn new(name: impl Into<String>, pretty_name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            pretty_name: pretty_name.into(),
            required: false,
            editable: true,
            unique: false,
            searchable: false,
            identifier: false,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_number_kind_is_unbounded() {
        let PropertyKind::Number {
            minimum,
            maximum,
            number_kind,
        } = PropertyKind::number()
        else {
            panic!("expected number kind");
        };
        assert_eq!(minimum, f64::MIN);
        assert_eq!(maximum, f64::MAX);
        assert_eq!(number_kind, NumberKind::Integer);
    }

    #[test]
    fn test_default_text_kind_is_unbounded() {
        let PropertyKind::Text {
            minimum_length,
            maximum_length,
            ..
        } = PropertyKind::text()
        else {
            panic!("expected text kind");
        };
        assert_eq!(minimum_length, 0);
        assert_eq!(maximum_length, usize::MAX);
    }

    #[test]
    fn test_new_property_defaults() {
        let property = Property::new("name", "Name", PropertyKind::text());
        assert!(!property.required);
        assert!(property.editable);
        assert!(!property.unique);
        assert!(!property.identifier);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(PropertyKind::text().kind_name(), "text");
        assert_eq!(PropertyKind::Boolean.kind_name(), "boolean");
    }
}
