//! Configuration types deserialized from `phydb.toml`.

use serde::Deserialize;

/// The top-level database configuration parsed from `phydb.toml`.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PhyDbConfig {
    /// Technology parameters applied to the database at construction.
    #[serde(default)]
    pub tech: TechSettings,
    /// Timing-exchange settings.
    #[serde(default)]
    pub timing: TimingSettings,
}

/// Technology parameters that are normally read from the LEF header.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TechSettings {
    /// Database units per micron.
    pub database_micron: Option<u32>,
    /// Manufacturing grid in microns.
    pub manufacturing_grid: Option<f64>,
    /// Name of the LEF file the technology came from.
    pub lef: Option<String>,
}

/// Settings for the timing-path exchange with an external timing engine.
#[derive(Debug, Clone, Deserialize)]
pub struct TimingSettings {
    /// Whether the database exposes timing exchange at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Whether a parasitics provider is expected to be plugged in.
    #[serde(default)]
    pub parasitics: ParasiticsMode,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            parasitics: ParasiticsMode::default(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// How pins are resolved to external electrical-model nodes.
#[derive(Debug, Default, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParasiticsMode {
    /// No parasitics provider; pin-to-node resolution is unavailable (default).
    #[default]
    None,
    /// A third-party provider is plugged in by the host integration.
    External,
}
