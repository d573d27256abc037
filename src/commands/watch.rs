use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use respack::Package;

use super::common::{emit, load_config, runtime_for};

/// How often packages are re-checked
const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub fn cmd_watch(config_path: Option<&Path>, keys: &[String], json: bool) -> Result<()> {
    let config = load_config(config_path, json)?;
    let runtime = runtime_for(&config, json)?;

    let packages: Vec<Arc<Package>> = if keys.is_empty() {
        runtime.registry().packages()
    } else {
        keys.iter()
            .map(|key| runtime.package(key))
            .collect::<Result<_, _>>()?
    };
    if packages.is_empty() {
        anyhow::bail!("no packages to watch");
    }

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl+C handler")?;

    if json {
        emit(serde_json::json!({
            "event": "start",
            "command": "watch",
            "root": config.source.root.display().to_string(),
            "packages": packages.iter().map(|p| p.key()).collect::<Vec<_>>(),
        }))?;
    } else {
        println!(
            "Watching {} package(s) under {} (Ctrl+C to stop)",
            packages.len(),
            config.source.root.display()
        );
    }

    let mut last: HashMap<String, String> = HashMap::new();
    while running.load(Ordering::SeqCst) {
        for package in &packages {
            let state = match runtime.cache().etag(package, true) {
                Ok(etag) => Ok(etag.to_string()),
                Err(e) => Err(e.to_string()),
            };
            let line = match &state {
                Ok(etag) => format!("{}\t{}", package.key(), etag),
                Err(e) => format!("error: {}: {}", package.key(), e),
            };
            // Print transitions only; the JSON sink already reports rebuilds.
            let previous = last.insert(package.key().to_string(), line.clone());
            if previous.as_deref() != Some(line.as_str()) && !json {
                match state {
                    Ok(_) => println!("{}", line),
                    Err(_) => eprintln!("{}", line),
                }
            }
        }
        std::thread::sleep(POLL_INTERVAL);
    }

    if json {
        emit(serde_json::json!({
            "event": "complete",
            "command": "watch",
        }))?;
    } else {
        println!("Stopped.");
    }
    Ok(())
}
