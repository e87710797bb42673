//! `stockwatch-core` — domain building blocks shared by every stockwatch crate.
//!
//! Pure primitives only: identifiers, the domain error type and the
//! entity/value-object marker traits. No IO lives here.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::DomainError;
pub use id::{JobId, OrderId, VariantId};
pub use value_object::ValueObject;
