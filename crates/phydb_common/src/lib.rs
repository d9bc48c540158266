//! Shared foundational types for the physical-design database.
//!
//! This crate provides the error type used for fatal precondition violations,
//! the [`define_id!`] macro for opaque entity IDs, and the generic
//! [`NamedRegistry`] that allocates stable sequential IDs to named
//! technology and design entities.

#![warn(missing_docs)]

pub mod ids;
pub mod registry;
pub mod result;

pub use ids::EntityId;
pub use registry::NamedRegistry;
pub use result::{PhyDbError, PhyResult};
