//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::EtagStrategy;
use crate::error::{ResPackError, ResPackResult};

use super::types::Config;
use super::ConfigWarning;

/// File name looked up in the project directory
pub const PROJECT_CONFIG_FILE: &str = "respack.toml";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
///
/// A relative `source.root` is anchored at the file's directory.
pub fn load_with_warnings(path: &Path) -> ResPackResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ResPackError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;
    config.validate(path)?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok((config.relative_to(base), warnings))
}

/// Load from project config, user config, or defaults
pub fn load_or_default(project_root: Option<&Path>) -> Config {
    let candidates = project_root
        .map(|root| root.join(PROJECT_CONFIG_FILE))
        .into_iter()
        .chain(user_config_path());

    for path in candidates {
        if !path.exists() {
            continue;
        }
        match Config::load(&path) {
            Ok(config) => return with_env_overrides(config),
            Err(e) => tracing::warn!(file = %path.display(), error = %e, "ignoring config file"),
        }
    }

    with_env_overrides(Config::default())
}

/// `<config dir>/respack/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("respack").join("config.toml"))
}

/// Apply environment variable overrides (RESPACK_* prefix)
pub fn with_env_overrides(mut config: Config) -> Config {
    // RESPACK_ROOT
    if let Ok(root) = std::env::var("RESPACK_ROOT") {
        if !root.is_empty() {
            config.source.root = PathBuf::from(root);
        }
    }

    // RESPACK_WATCH
    if let Ok(val) = std::env::var("RESPACK_WATCH") {
        config.source.watch = val.to_lowercase() != "false" && val != "0";
    }

    // RESPACK_ETAG
    if let Ok(val) = std::env::var("RESPACK_ETAG") {
        match val.parse::<EtagStrategy>() {
            Ok(strategy) => config.cache.etag = strategy,
            Err(e) => tracing::warn!(error = %e, "ignoring RESPACK_ETAG"),
        }
    }

    // RESPACK_ROUTE
    if let Ok(pattern) = std::env::var("RESPACK_ROUTE") {
        if !pattern.is_empty() {
            config.routing.pattern = Some(pattern);
        }
    }

    config
}

/// Line of the first `key = ...` assignment (or `[key]` table header)
pub(crate) fn find_line_number(content: &str, key: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| {
            let line = line.trim_start();
            let assigned = line
                .split_once('=')
                .is_some_and(|(lhs, _)| lhs.trim().trim_matches('"') == key);
            let header = line.starts_with('[')
                && line
                    .trim_matches(|c| c == '[' || c == ']')
                    .rsplit('.')
                    .next()
                    == Some(key);
            assigned || header
        })
        .map(|i| i + 1)
}

pub(crate) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "source",
        "root",
        "watch",
        "cache",
        "etag",
        "verify_on_read",
        "max_age_days",
        "compression",
        "routing",
        "pattern",
        "minify",
        "script",
        "stylesheet",
        "package",
        "key",
        "kind",
        "sources",
    ];

    CANDIDATES
        .iter()
        .map(|candidate| (*candidate, levenshtein(unknown, candidate)))
        .filter(|(_, dist)| *dist <= 2)
        .min_by_key(|(_, dist)| *dist)
        .map(|(candidate, _)| candidate.to_string())
}

/// Edit distance over bytes; keys are ASCII
fn levenshtein(a: &str, b: &str) -> usize {
    let b = b.as_bytes();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, &ac) in a.as_bytes().iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &bc) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = (above + 1)
                .min(row[j] + 1)
                .min(diagonal + usize::from(ac != bc));
            diagonal = above;
        }
    }

    row[b.len()]
}
