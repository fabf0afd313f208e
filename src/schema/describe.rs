//! Model description: the builder API that derives a [`Schema`]
//!
//! Schema derivation is an explicit registration-time step: the model's
//! registration code enumerates its properties and constraints through
//! [`ModelBuilder`] and [`PropertyBuilder`], and the resulting schema is
//! immutable for the life of the process.

use crate::core::error::SchemaError;
use crate::core::field::TextFormat;
use crate::id::IdentityStrategy;
use crate::schema::Schema;
use crate::schema::config::{
    ArrayConfig, DateConfig, EnumConfig, NumberConfig, ObjectConfig, TextConfig,
};
use crate::schema::property::{
    EnumValue, NumberKind, Property, PropertyKind, TextKind,
};
use chrono::{DateTime, Utc};

/// Derive a display name from a field name: `firstName` / `first_name`
/// both become `First Name`.
pub fn pretty_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for ch in name.chars() {
        if ch == '_' || ch == '-' {
            out.push(' ');
            prev = Some(' ');
            continue;
        }
        if let Some(p) = prev
            && p != ' '
            && ch.is_uppercase()
            && !p.is_uppercase()
        {
            out.push(' ');
        }
        if prev.is_none() || prev == Some(' ') {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        prev = Some(ch);
    }
    out
}

enum Config {
    Text(TextConfig),
    Number(NumberConfig),
    Date(DateConfig),
    Enum(EnumConfig),
    Array(ArrayConfig),
    Object(ObjectConfig),
    Boolean,
}

/// Builder for a single [`Property`]
///
/// Constraint setters only take effect on the matching kind; a length bound
/// on a number property is a no-op. Contradictory bounds are rejected when
/// the property is built.
pub struct PropertyBuilder {
    name: String,
    pretty: Option<String>,
    required: bool,
    editable: bool,
    unique: bool,
    searchable: bool,
    identifier: bool,
    config: Config,
}

impl PropertyBuilder {
    fn with_config(name: impl Into<String>, config: Config) -> Self {
        Self {
            name: name.into(),
            pretty: None,
            required: false,
            editable: true,
            unique: false,
            searchable: false,
            identifier: false,
            config,
        }
    }

    /// A text property, unbounded by default
    pub fn text(name: impl Into<String>) -> Self {
        Self::with_config(name, Config::Text(TextConfig::default()))
    }

    /// A number property, unbounded by default
    pub fn number(name: impl Into<String>) -> Self {
        Self::with_config(name, Config::Number(NumberConfig::default()))
    }

    /// A date property, unbounded by default
    pub fn date(name: impl Into<String>) -> Self {
        Self::with_config(name, Config::Date(DateConfig::default()))
    }

    /// An enum property over the given legal values
    pub fn enumeration<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|v| {
                let value: String = v.into();
                let pretty = pretty_name(&value);
                EnumValue::new(value, pretty)
            })
            .collect();
        Self::with_config(name, Config::Enum(EnumConfig { values }))
    }

    /// An array property over the given element kind, unbounded by default
    pub fn array(name: impl Into<String>, element: PropertyKind) -> Self {
        Self::with_config(name, Config::Array(ArrayConfig::of_element(element)))
    }

    /// A nested object property with its own property set
    pub fn object(name: impl Into<String>, properties: Vec<Property>) -> Self {
        Self::with_config(name, Config::Object(ObjectConfig { properties }))
    }

    /// A boolean property
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::with_config(name, Config::Boolean)
    }

    /// Override the derived display name
    pub fn pretty_name(mut self, pretty: impl Into<String>) -> Self {
        self.pretty = Some(pretty.into());
        self
    }

    /// Mark this property as the model's identifier
    pub fn identifier(mut self) -> Self {
        self.identifier = true;
        self
    }

    /// The value must be present and non-blank
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The value must be distinct across persisted items
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// The field participates in text search
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// The value may not change across updates
    pub fn uneditable(mut self) -> Self {
        self.editable = false;
        self
    }

    /// Minimum numeric value (number properties)
    pub fn minimum(mut self, minimum: f64) -> Self {
        if let Config::Number(c) = &mut self.config {
            c.minimum = minimum;
        }
        self
    }

    /// Maximum numeric value (number properties)
    pub fn maximum(mut self, maximum: f64) -> Self {
        if let Config::Number(c) = &mut self.config {
            c.maximum = maximum;
        }
        self
    }

    /// Record that the number is a floating-point value
    pub fn float(mut self) -> Self {
        if let Config::Number(c) = &mut self.config {
            c.number_kind = NumberKind::Float;
        }
        self
    }

    /// Minimum length (text) or element count (array)
    pub fn minimum_length(mut self, minimum: usize) -> Self {
        match &mut self.config {
            Config::Text(c) => c.minimum_length = minimum,
            Config::Array(c) => c.minimum_length = minimum,
            _ => {}
        }
        self
    }

    /// Maximum length (text) or element count (array)
    pub fn maximum_length(mut self, maximum: usize) -> Self {
        match &mut self.config {
            Config::Text(c) => c.maximum_length = maximum,
            Config::Array(c) => c.maximum_length = maximum,
            _ => {}
        }
        self
    }

    /// Format constraint (text properties)
    pub fn format(mut self, format: TextFormat) -> Self {
        if let Config::Text(c) = &mut self.config {
            c.format = Some(format);
        }
        self
    }

    /// Rendering hint (text properties)
    pub fn text_kind(mut self, kind: TextKind) -> Self {
        if let Config::Text(c) = &mut self.config {
            c.text_kind = kind;
        }
        self
    }

    /// Earliest legal date (date properties)
    pub fn minimum_date(mut self, minimum: DateTime<Utc>) -> Self {
        if let Config::Date(c) = &mut self.config {
            c.minimum = minimum;
        }
        self
    }

    /// Latest legal date (date properties)
    pub fn maximum_date(mut self, maximum: DateTime<Utc>) -> Self {
        if let Config::Date(c) = &mut self.config {
            c.maximum = maximum;
        }
        self
    }

    fn bounds_valid(&self) -> bool {
        match &self.config {
            Config::Text(c) => c.minimum_length <= c.maximum_length,
            Config::Number(c) => c.minimum <= c.maximum,
            Config::Date(c) => c.minimum <= c.maximum,
            Config::Array(c) => c.minimum_length <= c.maximum_length,
            Config::Enum(_) | Config::Object(_) | Config::Boolean => true,
        }
    }

    /// Build the property, rejecting contradictory bounds
    pub fn build(self) -> Result<Property, SchemaError> {
        if !self.bounds_valid() {
            return Err(SchemaError::InvalidBounds {
                property: self.name,
            });
        }

        let pretty = self.pretty.unwrap_or_else(|| pretty_name(&self.name));
        let mut property = Property::new(self.name, pretty, PropertyKind::Boolean);
        property.required = self.required;
        property.editable = self.editable;
        property.unique = self.unique;
        property.searchable = self.searchable;
        property.identifier = self.identifier;

        match self.config {
            Config::Text(c) => c.apply(&mut property),
            Config::Number(c) => c.apply(&mut property),
            Config::Date(c) => c.apply(&mut property),
            Config::Enum(c) => c.apply(&mut property),
            Config::Array(c) => c.apply(&mut property),
            Config::Object(c) => c.apply(&mut property),
            Config::Boolean => property.kind = PropertyKind::Boolean,
        }

        Ok(property)
    }
}

/// Builder for a full model [`Schema`]
///
/// Collects property builders in declaration order; all validation happens in
/// [`ModelBuilder::build`] so registration code can chain freely.
pub struct ModelBuilder {
    name: String,
    fields: Vec<PropertyBuilder>,
}

impl ModelBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a property to the model, keeping declaration order
    pub fn property(mut self, field: PropertyBuilder) -> Self {
        self.fields.push(field);
        self
    }

    /// Build the schema: unique names, exactly one identifier, and an
    /// identity strategy chosen from the identifier's declared kind
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut properties = Vec::with_capacity(self.fields.len());
        for field in self.fields {
            properties.push(field.build()?);
        }

        for (index, property) in properties.iter().enumerate() {
            if properties[..index].iter().any(|p| p.name == property.name) {
                return Err(SchemaError::DuplicateProperty {
                    model: self.name,
                    property: property.name.clone(),
                });
            }
        }

        let mut identifiers = properties.iter().enumerate().filter(|(_, p)| p.identifier);
        let Some((identifier, id_property)) = identifiers.next() else {
            return Err(SchemaError::NoIdentifier { model: self.name });
        };
        if identifiers.next().is_some() {
            return Err(SchemaError::MultipleIdentifiers { model: self.name });
        }

        // Strategy is fixed here, never re-dispatched per request.
        let identity = match &id_property.kind {
            PropertyKind::Text { .. } => IdentityStrategy::Hex,
            PropertyKind::Number { .. } => IdentityStrategy::Sequential,
            _ => {
                return Err(SchemaError::KindMismatch {
                    property: id_property.name.clone(),
                    expected: "text or number",
                });
            }
        };

        Ok(Schema::new(self.name, properties, identifier, identity))
    }
}
