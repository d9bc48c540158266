//! Design-level pin identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A connection point in the design: a (component, pin) pair.
///
/// Both halves are non-negative for real pins. [`Pin::UNMAPPED`] is the
/// consumer-facing encoding of "no pin"; it and any pin with a negative half
/// are never registered or stored as real pins.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Pin {
    /// Index of the component instance.
    pub comp_id: i32,
    /// Index of the pin within the component's macro.
    pub pin_id: i32,
}

impl Pin {
    /// The "no pin" sentinel.
    pub const UNMAPPED: Pin = Pin {
        comp_id: -1,
        pin_id: -1,
    };

    /// Creates a pin from its component and pin indices.
    pub fn new(comp_id: i32, pin_id: i32) -> Self {
        Self { comp_id, pin_id }
    }

    /// Returns `true` if both halves are non-negative.
    pub fn is_mapped(self) -> bool {
        self.comp_id >= 0 && self.pin_id >= 0
    }
}

impl Default for Pin {
    fn default() -> Self {
        Self::UNMAPPED
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.comp_id, self.pin_id)
    }
}
