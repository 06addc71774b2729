//! Product-specific domain logic: entity hooks, request validation, and list queries.

pub mod draft;
pub mod entity;
pub mod error;
pub mod query;

pub use draft::*;
pub use error::*;
pub use query::*;
