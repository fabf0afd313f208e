//! Validation passes run between deserialization and persistence
//!
//! Evaluators are stateless and reentrant: each call is a pure
//! validate-or-fail pass over its inputs, short-circuiting on the first
//! violation. Ordering (evaluate, then persist) is enforced by the callers.

pub mod integrity;
pub mod object;
pub mod update;

pub use integrity::{AtomicIntegrityEvaluator, IntegrityEvaluator};
pub use object::{DefaultObjectEvaluator, ObjectEvaluator};
pub use update::{DefaultObjectUpdateEvaluator, ObjectUpdateEvaluator};
