//! Model schemas: ordered property sets derived once at registration time
//!
//! A [`Schema`] is built through [`describe::ModelBuilder`] (or a declarative
//! [`definition::ModelDefinition`]) when a model is registered, then shared
//! read-only across all requests for that model.

pub mod config;
pub mod definition;
pub mod describe;
pub mod property;

pub use config::{ArrayConfig, DateConfig, EnumConfig, NumberConfig, ObjectConfig, TextConfig};
pub use definition::{ModelDefinition, PropertyDefinition};
pub use describe::{ModelBuilder, PropertyBuilder, pretty_name};
pub use property::{EnumValue, NumberKind, Property, PropertyKind, TextKind};

use crate::id::IdentityStrategy;

/// The full shape of one registered model
///
/// Invariants, enforced by [`ModelBuilder::build`]: property names are unique,
/// exactly one property is the identifier, and the identity strategy matches
/// the identifier's declared kind.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    properties: Vec<Property>,
    identifier: usize,
    identity: IdentityStrategy,
}

impl Schema {
    pub(crate) fn new(
        name: String,
        properties: Vec<Property>,
        identifier: usize,
        identity: IdentityStrategy,
    ) -> Self {
        Self {
            name,
            properties,
            identifier,
            identity,
        }
    }

    /// The model's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All properties in declaration order
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Look a property up by name
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// The identifier property
    pub fn identifier(&self) -> &Property {
        &self.properties[self.identifier]
    }

    /// The identity-assignment strategy fixed at build time
    pub fn identity(&self) -> IdentityStrategy {
        self.identity
    }

    /// Properties carrying a uniqueness constraint
    pub fn unique_properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter().filter(|p| p.unique)
    }

    /// Whether any property carries a uniqueness constraint
    pub fn has_integrity_rules(&self) -> bool {
        self.properties.iter().any(|p| p.unique)
    }

    /// Properties whose value may not change across updates
    pub fn non_editable_properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter().filter(|p| !p.editable)
    }

    /// Properties participating in text search
    pub fn searchable_properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter().filter(|p| p.searchable)
    }
}
