//! Types exchanged with the external timing engine.
//!
//! The engine refers to nets and pins through its own object pointers. The
//! database never dereferences them: a [`ForeignPtr`] is only the pointer's
//! bit pattern, used as a map key.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque pointer to an object owned by the external timing engine.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ForeignPtr(u64);

impl ForeignPtr {
    /// The null pointer; never a valid registration key.
    pub const NULL: ForeignPtr = ForeignPtr(0);

    /// Creates a foreign pointer from its raw bit pattern.
    pub fn from_raw(bits: u64) -> Self {
        Self(bits)
    }

    /// Captures the address of a native pointer without dereferencing it.
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self(ptr as usize as u64)
    }

    /// Returns the raw bit pattern.
    pub fn as_raw(self) -> u64 {
        self.0
    }

    /// Returns `true` for the null pointer.
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for ForeignPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ForeignPtr({:#x})", self.0)
    }
}

impl fmt::Display for ForeignPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// One timing arc as reported by the external engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForeignEdge {
    /// Pointer to the source pin.
    pub source: ForeignPtr,
    /// Pointer to the target pin.
    pub target: ForeignPtr,
    /// Pointer to the net the arc belongs to.
    pub net: ForeignPtr,
    /// Arc delay; must be non-negative.
    pub delay: f64,
}

impl ForeignEdge {
    /// Creates a foreign edge.
    pub fn new(source: ForeignPtr, target: ForeignPtr, net: ForeignPtr, delay: f64) -> Self {
        Self {
            source,
            target,
            net,
            delay,
        }
    }
}
