//! Opaque ID newtypes for design entities.
//!
//! Nets reuse [`phydb_timing::NetId`] so that a design net can be bound
//! directly to an external engine's net pointer.

use phydb_common::define_id;

pub use phydb_timing::NetId;

define_id!(
    /// Opaque, copyable ID for a component instance in the design.
    ComponentId
);
