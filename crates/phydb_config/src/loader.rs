//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::PhyDbConfig;
use std::path::Path;

/// The configuration file name looked up inside a database directory.
pub const CONFIG_FILE_NAME: &str = "phydb.toml";

/// Loads and validates a `phydb.toml` configuration from a directory.
///
/// Reads `<dir>/phydb.toml`, parses it, and validates the values.
pub fn load_config(dir: &Path) -> Result<PhyDbConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `phydb.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<PhyDbConfig, ConfigError> {
    let config: PhyDbConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that numeric technology parameters are in range.
fn validate_config(config: &PhyDbConfig) -> Result<(), ConfigError> {
    if config.tech.database_micron == Some(0) {
        return Err(ConfigError::ValidationError(
            "tech.database_micron must be positive".to_string(),
        ));
    }
    if let Some(grid) = config.tech.manufacturing_grid {
        if !(grid.is_finite() && grid > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "tech.manufacturing_grid must be positive, got {grid}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParasiticsMode;

    #[test]
    fn parse_empty_config() {
        let config = load_config_from_str("").unwrap();
        assert!(config.tech.database_micron.is_none());
        assert!(config.tech.manufacturing_grid.is_none());
        assert!(config.timing.enabled);
        assert_eq!(config.timing.parasitics, ParasiticsMode::None);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[tech]
database_micron = 2000
manufacturing_grid = 0.005
lef = "tech.lef"

[timing]
enabled = false
parasitics = "external"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.tech.database_micron, Some(2000));
        assert_eq!(config.tech.manufacturing_grid, Some(0.005));
        assert_eq!(config.tech.lef.as_deref(), Some("tech.lef"));
        assert!(!config.timing.enabled);
        assert_eq!(config.timing.parasitics, ParasiticsMode::External);
    }

    #[test]
    fn timing_section_defaults_enabled() {
        let toml = r#"
[timing]
parasitics = "none"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert!(config.timing.enabled);
    }

    #[test]
    fn absent_fields_fall_back_to_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.tech.database_micron, None);
        assert!(config.timing.enabled);
        assert_eq!(config.timing.parasitics, ParasiticsMode::None);

        let config = load_config_from_str("[tech]\n[timing]\n").unwrap();
        assert_eq!(config.tech.lef, None);
        assert!(config.timing.enabled);
    }

    #[test]
    fn mistyped_field_is_parse_error() {
        let err = load_config_from_str("[timing]\nenabled = \"yes\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn zero_database_micron_errors() {
        let err = load_config_from_str("[tech]\ndatabase_micron = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn negative_grid_errors() {
        let err = load_config_from_str("[tech]\nmanufacturing_grid = -0.01\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn unknown_parasitics_mode_errors() {
        let err = load_config_from_str("[timing]\nparasitics = \"spef\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[tech]\ndatabase_micron = 1000\n",
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.tech.database_micron, Some(1000));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
