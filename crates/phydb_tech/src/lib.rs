//! Technology database for the physical-design database.
//!
//! This crate stores the named technology entities a LEF producer registers
//! (layers, macros, fixed vias, via-rule-generates, and sites) and assigns
//! each a stable integer ID. Placement, routing, and timing tools refer to
//! technology entities by these IDs.
//!
//! # Usage
//!
//! ```
//! use phydb_tech::{LayerType, MetalDirection, Tech};
//!
//! let mut tech = Tech::new();
//! let metal1 = tech
//!     .add_layer("metal1", LayerType::Routing, MetalDirection::Horizontal)
//!     .unwrap()
//!     .id();
//! assert_eq!(tech.layer_name(metal1).unwrap(), "metal1");
//! ```

#![warn(missing_docs)]

pub mod ids;
pub mod tech;
pub mod types;

pub use ids::{LayerId, MacroId, MacroPinId, ViaId, ViaRuleId};
pub use tech::Tech;
pub use types::{
    Layer, LayerType, LefVia, Macro, MacroPin, MetalDirection, PinDirection, Site,
    ViaRuleGenerate,
};
