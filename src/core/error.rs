//! Typed error handling for the modelkit pipeline
//!
//! This module provides the error type hierarchy shared by the schema builder
//! and the evaluators, so that callers can handle failures specifically rather
//! than dealing with generic `anyhow::Error` values.
//!
//! # Error Categories
//!
//! - [`SchemaError`]: Errors raised while building a model schema (fatal at registration time)
//! - [`ValidationError`]: A field value violates a declared constraint
//! - [`IntegrityError`]: A uniqueness constraint is violated
//! - [`StorageError`]: Errors surfaced from the persistence collaborator
//!
//! # Example
//!
//! ```rust,ignore
//! use modelkit::prelude::*;
//!
//! match evaluator.evaluate(&instance, &schema) {
//!     Ok(()) => { /* hand off to persistence */ }
//!     Err(ModelError::Validation(ValidationError::Required { property })) => {
//!         println!("{} is missing", property);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for the modelkit pipeline
///
/// Each variant contains a more specific error type for that category.
#[derive(Debug)]
pub enum ModelError {
    /// Schema derivation errors (model registration)
    Schema(SchemaError),

    /// Field-level constraint violations, including immutability
    Validation(ValidationError),

    /// Uniqueness violations (against persisted state or within a batch)
    Integrity(IntegrityError),

    /// Persistence collaborator errors
    Storage(StorageError),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Schema(e) => write!(f, "{}", e),
            ModelError::Validation(e) => write!(f, "{}", e),
            ModelError::Integrity(e) => write!(f, "{}", e),
            ModelError::Storage(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Schema(e) => Some(e),
            ModelError::Validation(e) => Some(e),
            ModelError::Integrity(e) => Some(e),
            ModelError::Storage(e) => Some(e),
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ModelError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ModelError::Schema(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ModelError::Validation(_) => StatusCode::BAD_REQUEST,
            ModelError::Integrity(_) => StatusCode::BAD_REQUEST,
            ModelError::Storage(e) => e.status_code(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ModelError::Schema(_) => "SCHEMA_ERROR",
            ModelError::Validation(ValidationError::Immutable { .. }) => "IMMUTABLE_FIELD",
            ModelError::Validation(_) => "VALIDATION_ERROR",
            ModelError::Integrity(_) => "INTEGRITY_ERROR",
            ModelError::Storage(e) => e.error_code(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }

    /// Wrap a persistence failure reported by a `ModelStore`
    pub fn storage(err: anyhow::Error) -> Self {
        ModelError::Storage(StorageError::OperationFailed {
            message: err.to_string(),
        })
    }
}

impl IntoResponse for ModelError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Schema Errors
// =============================================================================

/// Errors raised while deriving a model schema
///
/// These are configuration mistakes: they abort model registration and are
/// never produced by per-request evaluation.
#[derive(Debug)]
pub enum SchemaError {
    /// The model declares no identifier property
    NoIdentifier { model: String },

    /// The model declares more than one identifier property
    MultipleIdentifiers { model: String },

    /// Two properties share the same name
    DuplicateProperty { model: String, property: String },

    /// A declared bound pair is contradictory (minimum above maximum)
    InvalidBounds { property: String },

    /// A property config was rehydrated from a property of another kind
    KindMismatch {
        property: String,
        expected: &'static str,
    },

    /// An array property definition does not say what its elements are
    MissingElement { property: String },

    /// A custom format pattern does not compile
    InvalidPattern { property: String, pattern: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::NoIdentifier { model } => {
                write!(f, "Model '{}' has no identifier property", model)
            }
            SchemaError::MultipleIdentifiers { model } => {
                write!(f, "Model '{}' declares more than one identifier", model)
            }
            SchemaError::DuplicateProperty { model, property } => {
                write!(
                    f,
                    "Model '{}' declares property '{}' more than once",
                    model, property
                )
            }
            SchemaError::InvalidBounds { property } => {
                write!(f, "Property '{}' declares minimum above maximum", property)
            }
            SchemaError::KindMismatch { property, expected } => {
                write!(f, "Property '{}' is not a {} property", property, expected)
            }
            SchemaError::MissingElement { property } => {
                write!(
                    f,
                    "Array property '{}' declares no element type",
                    property
                )
            }
            SchemaError::InvalidPattern { property, pattern } => {
                write!(
                    f,
                    "Property '{}' declares an invalid pattern '{}'",
                    property, pattern
                )
            }
        }
    }
}

impl std::error::Error for SchemaError {}

impl From<SchemaError> for ModelError {
    fn from(err: SchemaError) -> Self {
        ModelError::Schema(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors raised when a field value violates its declared constraints
///
/// Every variant carries the property's display name; messages are meant to be
/// shown to the API consumer as-is.
#[derive(Debug)]
pub enum ValidationError {
    /// A required field is null, missing, empty, or an unset date sentinel
    Required { property: String },

    /// A number field holds a non-numeric value
    NotANumber { property: String },

    /// A number field is outside its inclusive range
    NumberOutOfRange {
        property: String,
        minimum: f64,
        maximum: f64,
        value: f64,
    },

    /// A text field's length is outside its inclusive range
    TextLength {
        property: String,
        minimum_length: usize,
        maximum_length: usize,
        length: usize,
    },

    /// A text field does not match its declared format
    InvalidFormat { property: String, format: String },

    /// A date field holds a value that cannot be read as a date
    NotADate { property: String },

    /// A date field is outside its inclusive range
    DateOutOfRange {
        property: String,
        minimum: String,
        maximum: String,
    },

    /// An enum field holds a value outside the declared set
    NotInEnum { property: String, value: String },

    /// A boolean field holds a non-boolean value
    NotABoolean { property: String },

    /// An array field holds a non-array value
    NotAnArray { property: String },

    /// An array field's element count is outside its inclusive range
    ArrayLength {
        property: String,
        minimum_length: usize,
        maximum_length: usize,
        count: usize,
    },

    /// A non-editable field changed between the persisted and incoming instance
    Immutable { property: String },
}

/// Render a numeric bound without a trailing fraction when it is integral.
///
/// Unbounded sentinels (`f64::MIN`/`f64::MAX`) fall back to "unbounded" so
/// messages stay readable when only one side of the range was declared.
fn format_bound(bound: f64) -> String {
    if bound == f64::MIN || bound == f64::MAX {
        "unbounded".to_string()
    } else if bound.fract() == 0.0 && bound.abs() < 9e15 {
        format!("{}", bound as i64)
    } else {
        format!("{}", bound)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Required { property } => {
                write!(f, "{} is blank, please fill it in!", property)
            }
            ValidationError::NotANumber { property } => {
                write!(f, "{} must be a number", property)
            }
            ValidationError::NumberOutOfRange {
                property,
                minimum,
                maximum,
                value,
            } => {
                write!(
                    f,
                    "{} must be between {} and {}, was {}",
                    property,
                    format_bound(*minimum),
                    format_bound(*maximum),
                    format_bound(*value)
                )
            }
            ValidationError::TextLength {
                property,
                minimum_length,
                maximum_length,
                length,
            } => {
                write!(
                    f,
                    "{} must be between {} and {} characters long, was {}",
                    property, minimum_length, maximum_length, length
                )
            }
            ValidationError::InvalidFormat { property, format } => {
                write!(f, "{} must be a valid {}", property, format)
            }
            ValidationError::NotADate { property } => {
                write!(f, "{} must be a date", property)
            }
            ValidationError::DateOutOfRange {
                property,
                minimum,
                maximum,
            } => {
                write!(
                    f,
                    "{} must be between '{}' and '{}'",
                    property, minimum, maximum
                )
            }
            ValidationError::NotInEnum { property, value } => {
                write!(f, "'{}' is not a legal value for {}", value, property)
            }
            ValidationError::NotABoolean { property } => {
                write!(f, "{} must be true or false", property)
            }
            ValidationError::NotAnArray { property } => {
                write!(f, "{} must be a list of items", property)
            }
            ValidationError::ArrayLength {
                property,
                minimum_length,
                maximum_length,
                count,
            } => {
                write!(
                    f,
                    "{} can only consist of between {} and {} items, was {}",
                    property, minimum_length, maximum_length, count
                )
            }
            ValidationError::Immutable { property } => {
                write!(f, "{} can't be edited", property)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for ModelError {
    fn from(err: ValidationError) -> Self {
        ModelError::Validation(err)
    }
}

// =============================================================================
// Integrity Errors
// =============================================================================

/// Errors raised when a uniqueness constraint is violated
///
/// The rendered message always contains the word "duplicate" so callers can
/// distinguish this failure kind without matching on the type.
#[derive(Debug)]
pub enum IntegrityError {
    /// Another item (persisted or in the same batch) holds the same value
    Duplicate { property: String, value: String },
}

impl fmt::Display for IntegrityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityError::Duplicate { property, value } => {
                write!(
                    f,
                    "There is already a duplicate value '{}' for {}",
                    value, property
                )
            }
        }
    }
}

impl std::error::Error for IntegrityError {}

impl From<IntegrityError> for ModelError {
    fn from(err: IntegrityError) -> Self {
        ModelError::Integrity(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors surfaced from the persistence collaborator
#[derive(Debug)]
pub enum StorageError {
    /// No item with the given identifier exists
    NotFound { id: String },

    /// The store reported a failure while looking items up or writing
    OperationFailed { message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound { id } => {
                write!(f, "No item found with the id '{}'", id)
            }
            StorageError::OperationFailed { message } => {
                write!(f, "Storage operation failed: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for ModelError {
    fn from(err: StorageError) -> Self {
        ModelError::Storage(err)
    }
}

impl StorageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StorageError::NotFound { .. } => StatusCode::NOT_FOUND,
            StorageError::OperationFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::NotFound { .. } => "NOT_FOUND",
            StorageError::OperationFailed { .. } => "STORAGE_ERROR",
        }
    }
}
