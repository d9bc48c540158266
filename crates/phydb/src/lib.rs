//! A physical-design database: technology, design connectivity, and timing
//! exchange with an external timing engine.
//!
//! [`PhyDb`] owns the technology ([`Tech`]), the [`Design`] (components and
//! nets), and the configuration it was opened with. Timing exchange is set up
//! per engine through [`PhyDb::timing_api`].
//!
//! # Usage
//!
//! ```
//! use phydb::PhyDb;
//! use phydb_tech::PinDirection;
//!
//! let mut db = PhyDb::new();
//! let inv = db.tech_mut().add_macro("INV_X1").unwrap();
//! inv.add_pin("A", PinDirection::Input).unwrap();
//! inv.add_pin("ZN", PinDirection::Output).unwrap();
//!
//! db.add_component("u1", "INV_X1").unwrap();
//! assert_eq!(db.comp_pin("u1", "ZN").map(|p| p.pin_id), Some(1));
//! ```

#![warn(missing_docs)]

pub mod design;
pub mod ids;

pub use design::{Component, Design, Net};
pub use ids::{ComponentId, NetId};

use phydb_common::{PhyDbError, PhyResult};
use phydb_config::{ConfigError, ParasiticsMode, PhyDbConfig};
use phydb_tech::Tech;
use phydb_timing::{ParasiticsProvider, Pin, TimingApi, TimingEngine};
use std::path::Path;

/// Errors from [`PhyDb::open`].
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    /// The configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The configuration could not be applied to the database.
    #[error(transparent)]
    Db(#[from] PhyDbError),
}

/// The physical-design database.
#[derive(Debug, Default)]
pub struct PhyDb {
    config: PhyDbConfig,
    tech: Tech,
    design: Design,
}

impl PhyDb {
    /// Creates an empty database with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty database and applies the configured tech settings.
    pub fn from_config(config: PhyDbConfig) -> PhyResult<Self> {
        let mut tech = Tech::new();
        if let Some(micron) = config.tech.database_micron {
            tech.set_database_micron(micron)?;
        }
        if let Some(grid) = config.tech.manufacturing_grid {
            tech.set_manufacturing_grid(grid)?;
        }
        if let Some(lef) = &config.tech.lef {
            tech.set_lef_name(lef.clone());
        }
        tracing::debug!(
            timing = config.timing.enabled,
            parasitics = ?config.timing.parasitics,
            "opened physical-design database"
        );
        Ok(Self {
            config,
            tech,
            design: Design::new(),
        })
    }

    /// Loads `phydb.toml` from `dir` and creates a database from it.
    pub fn open(dir: &Path) -> Result<Self, OpenError> {
        let config = phydb_config::load_config(dir)?;
        Ok(Self::from_config(config)?)
    }

    /// Returns the configuration the database was created with.
    pub fn config(&self) -> &PhyDbConfig {
        &self.config
    }

    /// Returns the technology.
    pub fn tech(&self) -> &Tech {
        &self.tech
    }

    /// Returns the technology mutably, for LEF ingestion.
    pub fn tech_mut(&mut self) -> &mut Tech {
        &mut self.tech
    }

    /// Returns the design.
    pub fn design(&self) -> &Design {
        &self.design
    }

    /// Returns the design mutably.
    pub fn design_mut(&mut self) -> &mut Design {
        &mut self.design
    }

    /// Instantiates a technology macro as a new component.
    pub fn add_component(&mut self, name: &str, macro_name: &str) -> PhyResult<ComponentId> {
        let comp = self.design.add_component(&self.tech, name, macro_name)?;
        Ok(comp.id())
    }

    /// Resolves a component and macro-pin name pair to a design pin.
    pub fn comp_pin(&self, comp_name: &str, pin_name: &str) -> Option<Pin> {
        self.design.comp_pin(&self.tech, comp_name, pin_name)
    }

    /// Sets up timing exchange with `engine`.
    ///
    /// Fails with [`PhyDbError::CapabilityUnavailable`] when timing is
    /// disabled in the configuration.
    pub fn timing_api<E: TimingEngine>(&self, engine: E) -> PhyResult<TimingApi<E>> {
        if !self.config.timing.enabled {
            return Err(PhyDbError::CapabilityUnavailable("timing"));
        }
        if self.config.timing.parasitics == ParasiticsMode::External {
            tracing::warn!("parasitics are configured as external but no provider was given");
        }
        Ok(TimingApi::new(engine))
    }

    /// Sets up timing exchange with `engine` and a parasitics provider.
    ///
    /// Requires `parasitics = "external"` in the configuration.
    pub fn timing_api_with_parasitics<E: TimingEngine>(
        &self,
        engine: E,
        provider: impl ParasiticsProvider + 'static,
    ) -> PhyResult<TimingApi<E>> {
        if !self.config.timing.enabled {
            return Err(PhyDbError::CapabilityUnavailable("timing"));
        }
        if self.config.timing.parasitics != ParasiticsMode::External {
            return Err(PhyDbError::CapabilityUnavailable("parasitics"));
        }
        Ok(TimingApi::new(engine).with_parasitics(provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phydb_config::load_config_from_str;
    use phydb_timing::{ConstraintId, ExternalNode, ForeignPtr, Witness};

    #[derive(Debug)]
    struct NullEngine;

    impl TimingEngine for NullEngine {
        fn constraint_count(&mut self) -> usize {
            0
        }
        fn update_timing_incremental(&mut self) {}
        fn slack(&mut self, constraints: &[ConstraintId]) -> Vec<f64> {
            vec![0.0; constraints.len()]
        }
        fn witness(&mut self, _constraint: ConstraintId) -> Witness {
            Witness::default()
        }
        fn violated_constraints(&mut self) -> Vec<ConstraintId> {
            Vec::new()
        }
    }

    #[test]
    fn from_config_applies_tech_settings() {
        let config = load_config_from_str(
            r#"
[tech]
database_micron = 2000
manufacturing_grid = 0.005
lef = "nangate45.lef"
"#,
        )
        .unwrap();
        let db = PhyDb::from_config(config).unwrap();
        assert_eq!(db.tech().database_micron(), Some(2000));
        assert_eq!(db.tech().manufacturing_grid(), Some(0.005));
        assert_eq!(db.tech().lef_name(), Some("nangate45.lef"));
    }

    #[test]
    fn default_db_has_timing() {
        let db = PhyDb::new();
        assert!(db.config().timing.enabled);
        assert!(db.timing_api(NullEngine).is_ok());
    }

    #[test]
    fn disabled_timing_is_unavailable() {
        let config = load_config_from_str("[timing]\nenabled = false\n").unwrap();
        let db = PhyDb::from_config(config).unwrap();
        assert_eq!(
            db.timing_api(NullEngine).unwrap_err(),
            PhyDbError::CapabilityUnavailable("timing")
        );
    }

    #[test]
    fn parasitics_require_external_mode() {
        let provider = |_: ForeignPtr| -> Option<ExternalNode> { None };
        let db = PhyDb::new();
        assert_eq!(
            db.timing_api_with_parasitics(NullEngine, provider)
                .unwrap_err(),
            PhyDbError::CapabilityUnavailable("parasitics")
        );

        let config = load_config_from_str("[timing]\nparasitics = \"external\"\n").unwrap();
        let db = PhyDb::from_config(config).unwrap();
        let api = db.timing_api_with_parasitics(NullEngine, provider).unwrap();
        assert!(api.has_parasitics());
    }

    #[test]
    fn add_component_through_facade() {
        let mut db = PhyDb::new();
        db.tech_mut().add_macro("BUF_X1").unwrap();
        let id = db.add_component("b0", "BUF_X1").unwrap();
        assert_eq!(db.design().component_id("b0"), Some(id));
        assert!(db.add_component("b1", "BUF_X9").is_err());
    }
}
