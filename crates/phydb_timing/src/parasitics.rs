//! Optional parasitics capability.
//!
//! A third-party electrical-model provider can be plugged into
//! [`TimingApi`](crate::api::TimingApi) to resolve pins to its own nodes. The
//! timing DAG and the bridges never consult it.

use crate::foreign::ForeignPtr;
use serde::{Deserialize, Serialize};

/// An opaque node handle owned by a parasitics provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalNode(pub u64);

/// Resolves foreign pin pointers to nodes of an external electrical model.
pub trait ParasiticsProvider {
    /// Returns the model node for the pin behind `ptr`, if the model has one.
    fn find_pin(&self, ptr: ForeignPtr) -> Option<ExternalNode>;
}

impl<F> ParasiticsProvider for F
where
    F: Fn(ForeignPtr) -> Option<ExternalNode>,
{
    fn find_pin(&self, ptr: ForeignPtr) -> Option<ExternalNode> {
        self(ptr)
    }
}
