//! Opaque ID newtypes for timing-exchange entities.
//!
//! [`NetId`] is the internal net identity the pointer bridge maps foreign net
//! pointers to, [`ConstraintId`] numbers the external engine's timing
//! constraints, and [`TimingNodeId`] indexes nodes of the timing DAG.

use phydb_common::define_id;

define_id!(
    /// Opaque, copyable ID for a net in the design.
    NetId
);

define_id!(
    /// Opaque, copyable ID for a timing constraint owned by the external engine.
    ConstraintId
);

define_id!(
    /// Opaque, copyable ID for a node in the timing DAG.
    TimingNodeId
);
