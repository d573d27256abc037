//! Configuration type definitions

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ContentKind, EtagStrategy};
use crate::error::{ResPackError, ResPackResult};

use super::loader;
use super::ConfigWarning;

/// Where package sources are read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Directory `~/` and `/` virtual paths resolve against
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Subscribe to file system notifications after the first build
    #[serde(default = "default_true")]
    pub watch: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            watch: true,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

/// Cache and response behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub etag: EtagStrategy,

    /// Compare source modification times on every content request
    #[serde(default)]
    pub verify_on_read: bool,

    /// `Cache-Control` max age for package responses
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u64,

    #[serde(default = "default_true")]
    pub compression: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            etag: EtagStrategy::default(),
            verify_on_read: false,
            max_age_days: default_max_age_days(),
            compression: true,
        }
    }
}

fn default_max_age_days() -> u64 {
    365
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// e.g. `/content/{etag}/{key}`
    #[serde(default)]
    pub pattern: Option<String>,
}

/// External compressor command lines, program first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinifyConfig {
    #[serde(default)]
    pub script: Vec<String>,

    #[serde(default)]
    pub stylesheet: Vec<String>,
}

impl MinifyConfig {
    pub fn command_for(&self, kind: ContentKind) -> &[String] {
        match kind {
            ContentKind::Script => &self.script,
            ContentKind::Stylesheet => &self.stylesheet,
        }
    }
}

/// One `[[package]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageConfig {
    pub key: String,
    pub kind: ContentKind,

    #[serde(default = "default_true")]
    pub minify: bool,

    #[serde(default)]
    pub sources: Vec<String>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub minify: MinifyConfig,

    #[serde(default, rename = "package")]
    pub packages: Vec<PackageConfig>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ResPackResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> ResPackResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from `./respack.toml`, the user config, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> Self {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (RESPACK_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Anchor a relative source root at `base`
    pub fn relative_to(mut self, base: &Path) -> Self {
        if self.source.root.is_relative() {
            self.source.root = base.join(&self.source.root);
        }
        self
    }

    pub fn package(&self, key: &str) -> Option<&PackageConfig> {
        self.packages.iter().find(|p| p.key == key)
    }

    /// Reject package tables that cannot become distinct packages
    pub fn validate(&self, file: &Path) -> ResPackResult<()> {
        let mut seen = HashSet::new();
        for package in &self.packages {
            if !seen.insert(package.key.as_str()) {
                return Err(ResPackError::Config {
                    file: file.to_path_buf(),
                    message: format!("duplicate package key '{}'", package.key),
                });
            }
        }
        if let Some(pattern) = &self.routing.pattern {
            if !pattern.contains("{key}") {
                return Err(ResPackError::Config {
                    file: file.to_path_buf(),
                    message: format!("routing pattern '{}' must contain {{key}}", pattern),
                });
            }
        }
        Ok(())
    }
}
