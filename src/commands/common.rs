use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use respack::config::{user_config_path, PROJECT_CONFIG_FILE};
use respack::{create_runtime, CacheEventSink, Config, JsonEventSink, Runtime, TracingEventSink};

/// Resolve and load configuration: `--config`, `./respack.toml`, user
/// config, defaults. Environment overrides apply last.
pub fn load_config(explicit: Option<&Path>, json: bool) -> Result<Config> {
    let path: Option<PathBuf> = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let project = PathBuf::from(PROJECT_CONFIG_FILE);
            if project.exists() {
                Some(project)
            } else {
                user_config_path().filter(|p| p.exists())
            }
        }
    };

    let config = match path {
        Some(path) => {
            let (config, warnings) = Config::load_with_warnings(&path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            for warning in warnings {
                if json {
                    emit(serde_json::json!({
                        "event": "config_warning",
                        "key": warning.key,
                        "file": warning.file.display().to_string(),
                        "line": warning.line,
                        "suggestion": warning.suggestion,
                    }))?;
                } else {
                    eprintln!("warning: {}", warning);
                }
            }
            config
        }
        None => Config::default(),
    };

    Ok(config.with_env_overrides())
}

/// Runtime for commands that build once and exit; no watchers
pub fn open_runtime(config_path: Option<&Path>, json: bool) -> Result<Runtime> {
    let mut config = load_config(config_path, json)?;
    config.source.watch = false;
    runtime_for(&config, json)
}

pub fn runtime_for(config: &Config, json: bool) -> Result<Runtime> {
    let events: Arc<dyn CacheEventSink> = if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(TracingEventSink)
    };
    Ok(create_runtime(config, events)?)
}

/// Write a single NDJSON event (one JSON object per line).
pub fn write_event(out: &mut impl Write, event: &serde_json::Value) -> io::Result<()> {
    let line = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Convenience helper that writes to stdout.
pub fn emit(event: serde_json::Value) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_event(&mut out, &event)
}
