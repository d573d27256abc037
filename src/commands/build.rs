use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use respack::infrastructure::write_atomic;

use super::common::{emit, open_runtime};

pub fn cmd_build(config_path: Option<&Path>, key: &str, out: Option<&Path>, json: bool) -> Result<()> {
    if json {
        emit(serde_json::json!({
            "event": "start",
            "command": "build",
            "package": key,
        }))?;
    }

    let runtime = open_runtime(config_path, json)?;
    let package = runtime.package(key)?;
    let build = runtime.cache().build(&package, false)?;

    match out {
        Some(path) => {
            write_atomic(path, build.content().as_bytes())
                .with_context(|| format!("failed to write {}", path.display()))?;
            if !json {
                eprintln!(
                    "{} -> {} ({} bytes, etag {})",
                    key,
                    path.display(),
                    build.len(),
                    build.etag()
                );
            }
        }
        None if !json => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(build.content().as_bytes())?;
            stdout.flush()?;
        }
        None => {}
    }

    for missing in build.missing() {
        if !json {
            eprintln!("warning: {} is missing source {}", key, missing);
        }
    }

    if json {
        let mut event = serde_json::json!({
            "event": "complete",
            "command": "build",
            "package": key,
            "etag": build.etag().as_str(),
            "bytes": build.len(),
            "missing": build.missing().iter().map(|p| p.as_str()).collect::<Vec<_>>(),
        });
        match out {
            Some(path) => event["out"] = serde_json::json!(path.display().to_string()),
            None => event["content"] = serde_json::json!(build.content()),
        }
        emit(event)?;
    }
    Ok(())
}
