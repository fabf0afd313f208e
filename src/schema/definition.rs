//! Declarative model definitions (YAML or JSON)
//!
//! The alternative to calling [`ModelBuilder`](crate::schema::ModelBuilder)
//! directly: a model's shape can be written as configuration, loaded at
//! registration time and converted into a [`Schema`] through the same builder,
//! so both paths share one validation pass.
//!
//! ```yaml
//! name: Resource
//! properties:
//!   - name: id
//!     type: number
//!     identifier: true
//!   - name: uniqueField
//!     type: text
//!     unique: true
//!   - name: minLen10MaxLen50
//!     type: text
//!     minimum_length: 10
//!     maximum_length: 50
//! ```

use crate::core::error::SchemaError;
use crate::core::field::TextFormat;
use crate::schema::Schema;
use crate::schema::describe::{ModelBuilder, PropertyBuilder};
use crate::schema::property::{PropertyKind, TextKind};
use anyhow::Result;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Declared property type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindName {
    Text,
    Number,
    Date,
    Enum,
    Array,
    Object,
    Boolean,
}

/// Declared text format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatName {
    Email,
    Uuid,
    Url,
    Phone,
}

/// Declared text widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetName {
    Field,
    Area,
    Markdown,
}

fn default_true() -> bool {
    true
}

/// One field of a declarative model definition
///
/// Constraint fields that do not apply to the declared type are ignored, in
/// line with the builder's setters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDefinition {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: KindName,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pretty_name: Option<String>,

    #[serde(default)]
    pub identifier: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub searchable: bool,
    #[serde(default = "default_true")]
    pub editable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default)]
    pub float: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<WidgetName>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<Box<PropertyDefinition>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<PropertyDefinition>>,
}

impl PropertyDefinition {
    fn text_format(&self) -> Result<Option<TextFormat>, SchemaError> {
        if let Some(pattern) = &self.pattern {
            let regex = Regex::new(pattern).map_err(|_| SchemaError::InvalidPattern {
                property: self.name.clone(),
                pattern: pattern.clone(),
            })?;
            return Ok(Some(TextFormat::Custom(regex)));
        }
        Ok(self.format.map(|f| match f {
            FormatName::Email => TextFormat::Email,
            FormatName::Uuid => TextFormat::Uuid,
            FormatName::Url => TextFormat::Url,
            FormatName::Phone => TextFormat::Phone,
        }))
    }

    fn to_builder(&self) -> Result<PropertyBuilder, SchemaError> {
        let mut builder = match self.kind {
            KindName::Text => {
                let mut b = PropertyBuilder::text(&self.name);
                if let Some(min) = self.minimum_length {
                    b = b.minimum_length(min);
                }
                if let Some(max) = self.maximum_length {
                    b = b.maximum_length(max);
                }
                if let Some(format) = self.text_format()? {
                    b = b.format(format);
                }
                if let Some(widget) = self.widget {
                    b = b.text_kind(match widget {
                        WidgetName::Field => TextKind::Field,
                        WidgetName::Area => TextKind::Area,
                        WidgetName::Markdown => TextKind::Markdown,
                    });
                }
                b
            }
            KindName::Number => {
                let mut b = PropertyBuilder::number(&self.name);
                if let Some(min) = self.minimum {
                    b = b.minimum(min);
                }
                if let Some(max) = self.maximum {
                    b = b.maximum(max);
                }
                if self.float {
                    b = b.float();
                }
                b
            }
            KindName::Date => {
                let mut b = PropertyBuilder::date(&self.name);
                if let Some(min) = self.minimum_date {
                    b = b.minimum_date(min);
                }
                if let Some(max) = self.maximum_date {
                    b = b.maximum_date(max);
                }
                b
            }
            KindName::Enum => {
                let values = self.values.clone().unwrap_or_default();
                PropertyBuilder::enumeration(&self.name, values)
            }
            KindName::Array => {
                let element = self
                    .element
                    .as_ref()
                    .ok_or_else(|| SchemaError::MissingElement {
                        property: self.name.clone(),
                    })?;
                let mut b = PropertyBuilder::array(&self.name, element.to_kind()?);
                if let Some(min) = self.minimum_length {
                    b = b.minimum_length(min);
                }
                if let Some(max) = self.maximum_length {
                    b = b.maximum_length(max);
                }
                b
            }
            KindName::Object => {
                let mut children = Vec::new();
                for child in self.properties.as_deref().unwrap_or_default() {
                    children.push(child.to_builder()?.build()?);
                }
                PropertyBuilder::object(&self.name, children)
            }
            KindName::Boolean => PropertyBuilder::boolean(&self.name),
        };

        if let Some(pretty) = &self.pretty_name {
            builder = builder.pretty_name(pretty);
        }
        if self.identifier {
            builder = builder.identifier();
        }
        if self.required {
            builder = builder.required();
        }
        if self.unique {
            builder = builder.unique();
        }
        if self.searchable {
            builder = builder.searchable();
        }
        if !self.editable {
            builder = builder.uneditable();
        }
        Ok(builder)
    }

    /// Constraint payload of this definition, for array elements
    fn to_kind(&self) -> Result<PropertyKind, SchemaError> {
        Ok(self.to_builder()?.build()?.kind)
    }
}

/// A complete declarative model definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDefinition {
    /// Model name
    pub name: String,

    /// Fields in declaration order
    pub properties: Vec<PropertyDefinition>,
}

impl ModelDefinition {
    /// Load a definition from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let definition: Self = serde_yaml::from_str(&content)?;
        Ok(definition)
    }

    /// Load a definition from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let definition: Self = serde_yaml::from_str(yaml)?;
        Ok(definition)
    }

    /// Load a definition from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let definition: Self = serde_json::from_str(json)?;
        Ok(definition)
    }

    /// Convert into a schema through the regular builder
    pub fn into_schema(self) -> Result<Schema, SchemaError> {
        let mut builder = ModelBuilder::new(self.name);
        for property in &self.properties {
            builder = builder.property(property.to_builder()?);
        }
        builder.build()
    }
}
