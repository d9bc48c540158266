//! Bijective mapping between foreign engine pointers and internal identities.

use crate::foreign::ForeignPtr;
use crate::ids::NetId;
use crate::pin::Pin;
use phydb_common::{PhyDbError, PhyResult};
use std::collections::HashMap;

/// Maps external net and pin pointers to [`NetId`]s and [`Pin`]s and back.
///
/// Both maps are bijections: a pointer is bound to exactly one identity and an
/// identity to exactly one pointer. Registrations are permanent. Lookups never
/// fail; a miss is `None`.
#[derive(Debug, Clone, Default)]
pub struct PointerBridge {
    net_by_ptr: HashMap<ForeignPtr, NetId>,
    ptr_by_net: HashMap<NetId, ForeignPtr>,
    pin_by_ptr: HashMap<ForeignPtr, Pin>,
    ptr_by_pin: HashMap<Pin, ForeignPtr>,
}

impl PointerBridge {
    /// Creates an empty bridge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a foreign net pointer to a net ID.
    pub fn register_net(&mut self, ptr: ForeignPtr, id: NetId) -> PhyResult<()> {
        check_ptr("net", ptr, self.net_by_ptr.contains_key(&ptr))?;
        if let Some(&bound) = self.ptr_by_net.get(&id) {
            return Err(PhyDbError::DuplicateIdentity {
                kind: "net",
                identity: id.to_string(),
                ptr: bound.as_raw(),
            });
        }
        self.net_by_ptr.insert(ptr, id);
        self.ptr_by_net.insert(id, ptr);
        tracing::debug!(%ptr, net = id.as_raw(), "registered net pointer");
        Ok(())
    }

    /// Binds a foreign pin pointer to a pin.
    ///
    /// The [`Pin::UNMAPPED`] sentinel cannot be registered.
    pub fn register_pin(&mut self, ptr: ForeignPtr, pin: Pin) -> PhyResult<()> {
        if !pin.is_mapped() {
            return Err(PhyDbError::ReservedPin);
        }
        check_ptr("pin", ptr, self.pin_by_ptr.contains_key(&ptr))?;
        if let Some(&bound) = self.ptr_by_pin.get(&pin) {
            return Err(PhyDbError::DuplicateIdentity {
                kind: "pin",
                identity: pin.to_string(),
                ptr: bound.as_raw(),
            });
        }
        self.pin_by_ptr.insert(ptr, pin);
        self.ptr_by_pin.insert(pin, ptr);
        tracing::debug!(%ptr, %pin, "registered pin pointer");
        Ok(())
    }

    /// Shorthand for `register_pin(ptr, Pin::new(comp_id, pin_id))`.
    pub fn register_pin_parts(
        &mut self,
        ptr: ForeignPtr,
        comp_id: i32,
        pin_id: i32,
    ) -> PhyResult<()> {
        self.register_pin(ptr, Pin::new(comp_id, pin_id))
    }

    /// Returns `true` if `ptr` is bound to a net.
    pub fn is_net_registered(&self, ptr: ForeignPtr) -> bool {
        self.net_by_ptr.contains_key(&ptr)
    }

    /// Returns `true` if `ptr` is bound to a pin.
    pub fn is_pin_registered(&self, ptr: ForeignPtr) -> bool {
        self.pin_by_ptr.contains_key(&ptr)
    }

    /// Returns the net bound to `ptr`.
    pub fn net_id_of(&self, ptr: ForeignPtr) -> Option<NetId> {
        self.net_by_ptr.get(&ptr).copied()
    }

    /// Returns the pointer bound to net `id`.
    pub fn net_ptr_of(&self, id: NetId) -> Option<ForeignPtr> {
        self.ptr_by_net.get(&id).copied()
    }

    /// Returns the pin bound to `ptr`.
    pub fn pin_of(&self, ptr: ForeignPtr) -> Option<Pin> {
        self.pin_by_ptr.get(&ptr).copied()
    }

    /// Returns the pin bound to `ptr`, or [`Pin::UNMAPPED`] on a miss.
    pub fn pin_or_unmapped(&self, ptr: ForeignPtr) -> Pin {
        self.pin_of(ptr).unwrap_or(Pin::UNMAPPED)
    }

    /// Returns the pointer bound to `pin`.
    pub fn pin_ptr_of(&self, pin: Pin) -> Option<ForeignPtr> {
        self.ptr_by_pin.get(&pin).copied()
    }

    /// Returns the number of registered nets.
    pub fn net_count(&self) -> usize {
        self.net_by_ptr.len()
    }

    /// Returns the number of registered pins.
    pub fn pin_count(&self) -> usize {
        self.pin_by_ptr.len()
    }
}

fn check_ptr(kind: &'static str, ptr: ForeignPtr, taken: bool) -> PhyResult<()> {
    if ptr.is_null() {
        return Err(PhyDbError::NullPointer { kind });
    }
    if taken {
        return Err(PhyDbError::DuplicatePointer {
            kind,
            ptr: ptr.as_raw(),
        });
    }
    Ok(())
}
