//! Technology entity records.
//!
//! These records are thin: they carry the identity of each entity plus the
//! handful of attributes that placement and routing tools query. Geometry,
//! spacing tables, and electrical models live with their own collaborators.

use crate::ids::{LayerId, MacroId, MacroPinId, ViaId, ViaRuleId};
use phydb_common::{NamedRegistry, PhyResult};
use serde::{Deserialize, Serialize};

/// The function of a layer in the process stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerType {
    /// A metal routing layer.
    Routing,
    /// A cut (via) layer between two routing layers.
    Cut,
    /// An implant layer.
    Implant,
    /// A masterslice (poly, diffusion) layer.
    MasterSlice,
    /// An overlap layer used for block abutment checks.
    Overlap,
}

/// The preferred routing direction of a metal layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetalDirection {
    /// Preferred horizontal routing (default).
    #[default]
    Horizontal,
    /// Preferred vertical routing.
    Vertical,
    /// Preferred 45-degree diagonal routing.
    Diag45,
    /// Preferred 135-degree diagonal routing.
    Diag135,
}

/// A layer of the process stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    id: LayerId,
    name: String,
    /// The function of this layer.
    pub layer_type: LayerType,
    /// The preferred routing direction (meaningful for routing layers).
    pub direction: MetalDirection,
}

impl Layer {
    pub(crate) fn new(
        id: LayerId,
        name: &str,
        layer_type: LayerType,
        direction: MetalDirection,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            layer_type,
            direction,
        }
    }

    /// Returns the ID of this layer.
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Returns the name of this layer.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` for metal routing layers.
    pub fn is_routing(&self) -> bool {
        self.layer_type == LayerType::Routing
    }
}

/// The signal direction of a macro pin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinDirection {
    /// An input pin (default).
    #[default]
    Input,
    /// An output pin.
    Output,
    /// A bidirectional pin.
    Inout,
}

/// A pin of a macro.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroPin {
    id: MacroPinId,
    name: String,
    /// Signal direction of the pin.
    pub direction: PinDirection,
}

impl MacroPin {
    /// Returns the ID of this pin within its macro.
    pub fn id(&self) -> MacroPinId {
        self.id
    }

    /// Returns the name of this pin.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A macro: the master of a standard cell or block.
///
/// Pins are registered in their own registry so that a pin's ID within the
/// macro is stable and can be used as the pin half of a design-level pin
/// identity.
#[derive(Debug)]
pub struct Macro {
    id: MacroId,
    name: String,
    /// Origin offset in microns.
    pub origin: (f64, f64),
    /// Width in microns.
    pub width: f64,
    /// Height in microns.
    pub height: f64,
    pins: NamedRegistry<MacroPinId, MacroPin>,
}

impl Macro {
    pub(crate) fn new(id: MacroId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            origin: (0.0, 0.0),
            width: 0.0,
            height: 0.0,
            pins: NamedRegistry::new("macro pin"),
        }
    }

    /// Returns the ID of this macro.
    pub fn id(&self) -> MacroId {
        self.id
    }

    /// Returns the name of this macro.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the width and height in microns.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Registers a pin and returns its ID within this macro.
    pub fn add_pin(&mut self, name: &str, direction: PinDirection) -> PhyResult<MacroPinId> {
        let pin = self.pins.add(name, |id| MacroPin {
            id,
            name: name.to_string(),
            direction,
        })?;
        Ok(pin.id)
    }

    /// Returns the ID of the named pin, or `None` if the macro has no such pin.
    pub fn pin_id(&self, name: &str) -> Option<MacroPinId> {
        self.pins.id_of(name)
    }

    /// Returns the pin registry of this macro.
    pub fn pins(&self) -> &NamedRegistry<MacroPinId, MacroPin> {
        &self.pins
    }
}

/// A fixed via defined in the technology LEF.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LefVia {
    id: ViaId,
    name: String,
    /// Whether this via is a default via for its layer pair.
    pub is_default: bool,
}

impl LefVia {
    pub(crate) fn new(id: ViaId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            is_default: false,
        }
    }

    /// Returns the ID of this via.
    pub fn id(&self) -> ViaId {
        self.id
    }

    /// Returns the name of this via.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A via-rule-generate: a parametric rule from which vias are synthesized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViaRuleGenerate {
    id: ViaRuleId,
    name: String,
    /// Whether this rule is a default rule.
    pub is_default: bool,
}

impl ViaRuleGenerate {
    pub(crate) fn new(id: ViaRuleId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            is_default: false,
        }
    }

    /// Returns the ID of this rule.
    pub fn id(&self) -> ViaRuleId {
        self.id
    }

    /// Returns the name of this rule.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A placement site (row template).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    /// Site name.
    pub name: String,
    /// Site class (e.g. "core", "pad").
    pub class_name: String,
    /// Width in microns.
    pub width: f64,
    /// Height in microns.
    pub height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macro_pins_get_sequential_ids() {
        let mut m = Macro::new(MacroId::from_raw(0), "NAND2_X1");
        let a = m.add_pin("A", PinDirection::Input).unwrap();
        let b = m.add_pin("B", PinDirection::Input).unwrap();
        let zn = m.add_pin("ZN", PinDirection::Output).unwrap();
        assert_eq!((a.as_raw(), b.as_raw(), zn.as_raw()), (0, 1, 2));
        assert_eq!(m.pin_id("ZN"), Some(zn));
        assert_eq!(m.pins()[zn].direction, PinDirection::Output);
    }

    #[test]
    fn duplicate_macro_pin_fails() {
        let mut m = Macro::new(MacroId::from_raw(0), "INV_X1");
        m.add_pin("A", PinDirection::Input).unwrap();
        assert!(m.add_pin("A", PinDirection::Output).is_err());
        assert_eq!(m.pins().len(), 1);
    }

    #[test]
    fn routing_layer_predicate() {
        let m1 = Layer::new(
            LayerId::from_raw(0),
            "metal1",
            LayerType::Routing,
            MetalDirection::Horizontal,
        );
        let v1 = Layer::new(
            LayerId::from_raw(1),
            "via1",
            LayerType::Cut,
            MetalDirection::default(),
        );
        assert!(m1.is_routing());
        assert!(!v1.is_routing());
    }

    #[test]
    fn layer_serde_roundtrip() {
        let layer = Layer::new(
            LayerId::from_raw(4),
            "metal3",
            LayerType::Routing,
            MetalDirection::Vertical,
        );
        let json = serde_json::to_string(&layer).unwrap();
        let restored: Layer = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id(), layer.id());
        assert_eq!(restored.name(), "metal3");
        assert_eq!(restored.direction, MetalDirection::Vertical);
    }
}
