//! The technology database: layers, macros, vias, via rules, and sites.
//!
//! [`Tech`] is populated once while the technology LEF is ingested and read
//! for the rest of the database's lifetime. Every named entity kind lives in
//! its own [`NamedRegistry`], so names are unique per kind and IDs are the
//! registration order.

use crate::ids::{LayerId, MacroId, ViaId, ViaRuleId};
use crate::types::{Layer, LayerType, LefVia, Macro, MetalDirection, Site, ViaRuleGenerate};
use phydb_common::{NamedRegistry, PhyDbError, PhyResult};

/// Technology data shared by every design in the database.
#[derive(Debug)]
pub struct Tech {
    database_micron: Option<u32>,
    manufacturing_grid: Option<f64>,
    placement_grid: Option<(f64, f64)>,
    lef_name: Option<String>,
    sites: Vec<Site>,
    layers: NamedRegistry<LayerId, Layer>,
    macros: NamedRegistry<MacroId, Macro>,
    vias: NamedRegistry<ViaId, LefVia>,
    via_rules: NamedRegistry<ViaRuleId, ViaRuleGenerate>,
}

impl Tech {
    /// Creates an empty technology database.
    pub fn new() -> Self {
        Self {
            database_micron: None,
            manufacturing_grid: None,
            placement_grid: None,
            lef_name: None,
            sites: Vec::new(),
            layers: NamedRegistry::new("layer"),
            macros: NamedRegistry::new("macro"),
            vias: NamedRegistry::new("via"),
            via_rules: NamedRegistry::new("via rule"),
        }
    }

    // --- Set-once parameters ---

    /// Sets the number of database units per micron.
    ///
    /// Setting the same value again is accepted; a different value is an error.
    pub fn set_database_micron(&mut self, database_micron: u32) -> PhyResult<()> {
        if database_micron == 0 {
            return Err(PhyDbError::InvalidSetting {
                setting: "database micron",
                reason: "must be positive".to_string(),
            });
        }
        set_once(&mut self.database_micron, database_micron, "database micron")
    }

    /// Returns the number of database units per micron, if set.
    pub fn database_micron(&self) -> Option<u32> {
        self.database_micron
    }

    /// Sets the manufacturing grid in microns.
    pub fn set_manufacturing_grid(&mut self, grid: f64) -> PhyResult<()> {
        require_positive(grid, "manufacturing grid")?;
        set_once(&mut self.manufacturing_grid, grid, "manufacturing grid")
    }

    /// Returns the manufacturing grid in microns, if set.
    pub fn manufacturing_grid(&self) -> Option<f64> {
        self.manufacturing_grid
    }

    /// Sets the placement grid pitch in microns.
    pub fn set_placement_grid(&mut self, x: f64, y: f64) -> PhyResult<()> {
        require_positive(x, "placement grid")?;
        require_positive(y, "placement grid")?;
        set_once(&mut self.placement_grid, (x, y), "placement grid")
    }

    /// Returns the placement grid pitch `(x, y)`, or `None` if it was never set.
    pub fn placement_grid(&self) -> Option<(f64, f64)> {
        self.placement_grid
    }

    /// Records the name of the LEF file the technology was read from.
    pub fn set_lef_name(&mut self, name: impl Into<String>) {
        self.lef_name = Some(name.into());
    }

    /// Returns the LEF file name, if recorded.
    pub fn lef_name(&self) -> Option<&str> {
        self.lef_name.as_deref()
    }

    // --- Sites ---

    /// Appends a placement site.
    pub fn add_site(&mut self, name: &str, class_name: &str, width: f64, height: f64) -> &Site {
        self.sites.push(Site {
            name: name.to_string(),
            class_name: class_name.to_string(),
            width,
            height,
        });
        &self.sites[self.sites.len() - 1]
    }

    /// Returns all sites in insertion order.
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    // --- Layers ---

    /// Returns `true` if a layer with this name exists.
    pub fn is_layer_existing(&self, name: &str) -> bool {
        self.layers.exists(name)
    }

    /// Registers a layer.
    pub fn add_layer(
        &mut self,
        name: &str,
        layer_type: LayerType,
        direction: MetalDirection,
    ) -> PhyResult<&mut Layer> {
        self.layers
            .add(name, |id| Layer::new(id, name, layer_type, direction))
    }

    /// Returns the named layer.
    pub fn get_layer(&self, name: &str) -> PhyResult<&Layer> {
        self.layers.get(name)
    }

    /// Returns the named layer mutably.
    pub fn get_layer_mut(&mut self, name: &str) -> PhyResult<&mut Layer> {
        self.layers.get_mut(name)
    }

    /// Returns the ID of the named layer, or `None` if it does not exist.
    pub fn layer_id(&self, name: &str) -> Option<LayerId> {
        self.layers.id_of(name)
    }

    /// Returns the name of the layer with the given ID.
    pub fn layer_name(&self, id: LayerId) -> PhyResult<&str> {
        self.layers.name_of(id)
    }

    /// Returns the layer registry.
    pub fn layers(&self) -> &NamedRegistry<LayerId, Layer> {
        &self.layers
    }

    /// Returns the IDs of all routing (metal) layers, bottom to top.
    pub fn metal_layers(&self) -> Vec<LayerId> {
        self.layers
            .iter()
            .filter(|(_, layer)| layer.is_routing())
            .map(|(id, _)| id)
            .collect()
    }

    // --- Macros ---

    /// Returns `true` if a macro with this name exists.
    pub fn is_macro_existing(&self, name: &str) -> bool {
        self.macros.exists(name)
    }

    /// Registers a macro.
    pub fn add_macro(&mut self, name: &str) -> PhyResult<&mut Macro> {
        self.macros.add(name, |id| Macro::new(id, name))
    }

    /// Returns the named macro.
    pub fn get_macro(&self, name: &str) -> PhyResult<&Macro> {
        self.macros.get(name)
    }

    /// Returns the named macro mutably.
    pub fn get_macro_mut(&mut self, name: &str) -> PhyResult<&mut Macro> {
        self.macros.get_mut(name)
    }

    /// Returns the ID of the named macro, or `None` if it does not exist.
    pub fn macro_id(&self, name: &str) -> Option<MacroId> {
        self.macros.id_of(name)
    }

    /// Returns the name of the macro with the given ID.
    pub fn macro_name(&self, id: MacroId) -> PhyResult<&str> {
        self.macros.name_of(id)
    }

    /// Returns the macro registry.
    pub fn macros(&self) -> &NamedRegistry<MacroId, Macro> {
        &self.macros
    }

    // --- LEF vias ---

    /// Returns `true` if a LEF via with this name exists.
    pub fn is_lef_via_existing(&self, name: &str) -> bool {
        self.vias.exists(name)
    }

    /// Registers a LEF via.
    pub fn add_lef_via(&mut self, name: &str) -> PhyResult<&mut LefVia> {
        self.vias.add(name, |id| LefVia::new(id, name))
    }

    /// Returns the named LEF via.
    pub fn get_lef_via(&self, name: &str) -> PhyResult<&LefVia> {
        self.vias.get(name)
    }

    /// Returns the ID of the named LEF via, or `None` if it does not exist.
    pub fn lef_via_id(&self, name: &str) -> Option<ViaId> {
        self.vias.id_of(name)
    }

    /// Returns the name of the LEF via with the given ID.
    pub fn lef_via_name(&self, id: ViaId) -> PhyResult<&str> {
        self.vias.name_of(id)
    }

    /// Returns the LEF via registry.
    pub fn lef_vias(&self) -> &NamedRegistry<ViaId, LefVia> {
        &self.vias
    }

    // --- Via-rule-generates ---

    /// Returns `true` if a via-rule-generate with this name exists.
    pub fn is_via_rule_generate_existing(&self, name: &str) -> bool {
        self.via_rules.exists(name)
    }

    /// Registers a via-rule-generate.
    pub fn add_via_rule_generate(&mut self, name: &str) -> PhyResult<&mut ViaRuleGenerate> {
        self.via_rules.add(name, |id| ViaRuleGenerate::new(id, name))
    }

    /// Returns the named via-rule-generate.
    pub fn get_via_rule_generate(&self, name: &str) -> PhyResult<&ViaRuleGenerate> {
        self.via_rules.get(name)
    }

    /// Returns the ID of the named via-rule-generate, or `None` if it does not exist.
    pub fn via_rule_generate_id(&self, name: &str) -> Option<ViaRuleId> {
        self.via_rules.id_of(name)
    }

    /// Returns the name of the via-rule-generate with the given ID.
    pub fn via_rule_generate_name(&self, id: ViaRuleId) -> PhyResult<&str> {
        self.via_rules.name_of(id)
    }

    /// Returns the via-rule-generate registry.
    pub fn via_rule_generates(&self) -> &NamedRegistry<ViaRuleId, ViaRuleGenerate> {
        &self.via_rules
    }
}

impl Default for Tech {
    fn default() -> Self {
        Self::new()
    }
}

fn set_once<T: PartialEq + Copy + std::fmt::Debug>(
    slot: &mut Option<T>,
    value: T,
    setting: &'static str,
) -> PhyResult<()> {
    match slot {
        Some(current) if *current != value => {
            tracing::warn!(setting, ?current, requested = ?value, "conflicting technology setting");
            Err(PhyDbError::SettingAlreadySet { setting })
        }
        _ => {
            *slot = Some(value);
            tracing::debug!(setting, ?value, "technology setting applied");
            Ok(())
        }
    }
}

fn require_positive(value: f64, setting: &'static str) -> PhyResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PhyDbError::InvalidSetting {
            setting,
            reason: format!("must be positive, got {value}"),
        })
    }
}
