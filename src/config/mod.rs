//! Configuration module for respack
//!
//! Resolution order:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (RESPACK_*)
//! 3. `--config` file, else `./respack.toml`
//! 4. User config (`<config dir>/respack/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{user_config_path, PROJECT_CONFIG_FILE};
pub use types::{CacheConfig, Config, MinifyConfig, PackageConfig, RoutingConfig, SourceConfig};
