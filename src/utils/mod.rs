//! Shared helpers: ID generation and validated request extractors.

pub mod id;
pub mod validate;

pub use id::IdGenerator;
pub use validate::{ValidatedJson, ValidatedQuery};
