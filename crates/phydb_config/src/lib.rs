//! Parsing and validation of `phydb.toml` database configuration files.
//!
//! This crate reads the configuration file and produces a strongly-typed
//! [`PhyDbConfig`] holding technology parameters and timing-exchange settings.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
