//! # Modelkit
//!
//! A schema-driven model description and validation pipeline for building
//! entity REST APIs in Rust.
//!
//! ## Features
//!
//! - **Explicit Schema Derivation**: Models declare their shape once, through
//!   a builder API or a declarative YAML/JSON definition
//! - **Tagged Constraint Payloads**: One typed variant per property kind
//!   (text, number, date, enum, array, object, boolean), checked exhaustively
//! - **Field-Level Validation**: Required-ness, numeric ranges, text lengths
//!   and formats, date ranges, array bounds, nested-object recursion
//! - **Immutability Checking**: Non-editable fields cannot change on update
//! - **Uniqueness Enforcement**: Per-item checks against persisted state and
//!   atomic batch checks before any element is written
//! - **Identity Strategies**: Random hex for text identifiers, next-unused
//!   integer for numeric ones, fixed at schema build time
//! - **Pluggable Persistence**: A narrow async CRUD contract with an
//!   in-memory implementation for tests and development
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use modelkit::prelude::*;
//!
//! let schema = ModelBuilder::new("Resource")
//!     .property(PropertyBuilder::number("id").identifier())
//!     .property(PropertyBuilder::text("email").unique().format(TextFormat::Email))
//!     .property(PropertyBuilder::text("title").required().maximum_length(120))
//!     .build()?;
//!
//! let store = Arc::new(InMemoryModelStore::new(&schema));
//! let service = ModelService::new(schema, store);
//!
//! // Deserialized payloads go through the full pipeline before persistence.
//! let created = service.create(json!({
//!     "email": "sam@example.com",
//!     "title": "First post",
//! })).await?;
//! ```

pub mod core;
pub mod evaluate;
pub mod id;
pub mod schema;
pub mod service;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Errors ===
    pub use crate::core::error::{
        IntegrityError, ModelError, SchemaError, StorageError, ValidationError,
    };
    pub use crate::core::field::TextFormat;

    // === Schema ===
    pub use crate::schema::{
        EnumValue, ModelBuilder, ModelDefinition, NumberKind, Property, PropertyBuilder,
        PropertyKind, Schema, TextKind,
    };

    // === Evaluators ===
    pub use crate::evaluate::{
        AtomicIntegrityEvaluator, DefaultObjectEvaluator, DefaultObjectUpdateEvaluator,
        IntegrityEvaluator, ObjectEvaluator, ObjectUpdateEvaluator,
    };

    // === Identity ===
    pub use crate::id::IdentityStrategy;

    // === Storage & Service ===
    pub use crate::service::ModelService;
    pub use crate::storage::{InMemoryModelStore, ModelStore};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};
    pub use uuid::Uuid;
}
