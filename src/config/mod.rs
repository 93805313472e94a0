//! Configuration module for ebdeploy
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (EBDEPLOY_*, then AWS_REGION / AWS_DEFAULT_REGION)
//! 3. Config file (--config, ./ebdeploy.toml, or ~/.config/ebdeploy/config.toml)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod resolver;
mod types;

pub use loader::{discover, ConfigError, ConfigWarning, LoadedConfig, PROJECT_CONFIG_FILE};
pub use resolver::{resolve, DeployArgs, Resolved};
pub use types::{
    ColorMode, Config, DeploySection, NetworkSection, OutputSection, ReadinessSection,
    RolesSection,
};
