//! Core module containing the error hierarchy and shared value types

pub mod error;
pub mod field;

pub use error::{IntegrityError, ModelError, SchemaError, StorageError, ValidationError};
pub use field::TextFormat;
