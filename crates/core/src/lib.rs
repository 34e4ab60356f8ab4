//! `rolegate-core` — shared building blocks for the RBAC crates.
//!
//! Pure types only: no logging, no I/O.

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{RbacError, RbacResult};
pub use id::UserId;
pub use value_object::ValueObject;
