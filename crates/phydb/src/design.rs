//! Design connectivity: component instances and the nets between them.
//!
//! Components and nets are kept in [`NamedRegistry`]s, so both get
//! sequential IDs in registration order. A [`Pin`] is the pair of a component
//! ID and a pin ID within that component's macro.

use crate::ids::{ComponentId, NetId};
use phydb_common::{NamedRegistry, PhyDbError, PhyResult};
use phydb_tech::{MacroId, MacroPinId, Tech};
use phydb_timing::Pin;
use serde::{Deserialize, Serialize};

/// A placed or unplaced instance of a technology macro.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    id: ComponentId,
    name: String,
    macro_id: MacroId,
}

impl Component {
    /// Returns the ID of this component.
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Returns the instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the macro this component instantiates.
    pub fn macro_id(&self) -> MacroId {
        self.macro_id
    }
}

/// A net: the component pins and IO pins it connects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Net {
    id: NetId,
    name: String,
    pins: Vec<Pin>,
    io_pins: Vec<String>,
}

impl Net {
    fn new(id: NetId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            pins: Vec::new(),
            io_pins: Vec::new(),
        }
    }

    /// Returns the ID of this net.
    pub fn id(&self) -> NetId {
        self.id
    }

    /// Returns the net name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Connects a component pin to this net.
    pub fn add_comp_pin(&mut self, comp: ComponentId, pin: MacroPinId) -> PhyResult<Pin> {
        let pin = to_pin(comp, pin)?;
        self.pins.push(pin);
        Ok(pin)
    }

    /// Connects a top-level IO pin to this net.
    pub fn add_io_pin(&mut self, name: &str) {
        self.io_pins.push(name.to_string());
    }

    /// Returns the connected component pins in connection order.
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Returns the connected IO pin names in connection order.
    pub fn io_pins(&self) -> &[String] {
        &self.io_pins
    }
}

fn to_pin(comp: ComponentId, pin: MacroPinId) -> PhyResult<Pin> {
    let comp_id = i32::try_from(comp.as_raw()).map_err(|_| PhyDbError::IdOutOfRange {
        kind: "component",
        id: comp.as_raw(),
        len: i32::MAX as usize,
    })?;
    let pin_id = i32::try_from(pin.as_raw()).map_err(|_| PhyDbError::IdOutOfRange {
        kind: "macro pin",
        id: pin.as_raw(),
        len: i32::MAX as usize,
    })?;
    Ok(Pin::new(comp_id, pin_id))
}

/// The component and net registries of one design.
#[derive(Debug)]
pub struct Design {
    components: NamedRegistry<ComponentId, Component>,
    nets: NamedRegistry<NetId, Net>,
}

impl Design {
    /// Creates an empty design.
    pub fn new() -> Self {
        Self {
            components: NamedRegistry::new("component"),
            nets: NamedRegistry::new("net"),
        }
    }

    /// Instantiates the macro `macro_name` as component `name`.
    ///
    /// Fails if the component name is taken or `tech` has no such macro.
    pub fn add_component(
        &mut self,
        tech: &Tech,
        name: &str,
        macro_name: &str,
    ) -> PhyResult<&mut Component> {
        let macro_id = tech
            .macro_id(macro_name)
            .ok_or_else(|| PhyDbError::UnknownName {
                kind: "macro",
                name: macro_name.to_string(),
            })?;
        self.components.add(name, |id| Component {
            id,
            name: name.to_string(),
            macro_id,
        })
    }

    /// Returns `true` if a component with this name exists.
    pub fn is_component_existing(&self, name: &str) -> bool {
        self.components.exists(name)
    }

    /// Returns the component named `name`.
    pub fn get_component(&self, name: &str) -> PhyResult<&Component> {
        self.components.get(name)
    }

    /// Returns the ID of the named component, if any.
    pub fn component_id(&self, name: &str) -> Option<ComponentId> {
        self.components.id_of(name)
    }

    /// Returns the component registry.
    pub fn components(&self) -> &NamedRegistry<ComponentId, Component> {
        &self.components
    }

    /// Registers a net with no connections.
    pub fn add_net(&mut self, name: &str) -> PhyResult<&mut Net> {
        self.nets.add(name, |id| Net::new(id, name))
    }

    /// Returns `true` if a net with this name exists.
    pub fn is_net_existing(&self, name: &str) -> bool {
        self.nets.exists(name)
    }

    /// Returns the net named `name`.
    pub fn get_net(&self, name: &str) -> PhyResult<&Net> {
        self.nets.get(name)
    }

    /// Returns the net named `name` mutably.
    pub fn get_net_mut(&mut self, name: &str) -> PhyResult<&mut Net> {
        self.nets.get_mut(name)
    }

    /// Returns the ID of the named net, if any.
    pub fn net_id(&self, name: &str) -> Option<NetId> {
        self.nets.id_of(name)
    }

    /// Returns the net registry.
    pub fn nets(&self) -> &NamedRegistry<NetId, Net> {
        &self.nets
    }

    /// Resolves a component and macro-pin name pair to a design [`Pin`].
    ///
    /// Returns `None` if the component or its macro pin does not exist.
    pub fn comp_pin(&self, tech: &Tech, comp_name: &str, pin_name: &str) -> Option<Pin> {
        let comp = self.components.id_of(comp_name)?;
        let macro_id = self.components[comp].macro_id;
        let pin = tech.macros().by_id(macro_id)?.pin_id(pin_name)?;
        to_pin(comp, pin).ok()
    }
}

impl Default for Design {
    fn default() -> Self {
        Self::new()
    }
}
