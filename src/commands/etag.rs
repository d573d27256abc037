use std::path::Path;

use anyhow::Result;

use super::common::{emit, open_runtime};

pub fn cmd_etag(config_path: Option<&Path>, key: &str, json: bool) -> Result<()> {
    let runtime = open_runtime(config_path, json)?;
    let package = runtime.package(key)?;
    let etag = runtime.cache().etag(&package, true)?;

    if json {
        emit(serde_json::json!({
            "event": "complete",
            "command": "etag",
            "package": key,
            "etag": etag.as_str(),
        }))?;
    } else {
        println!("{}", etag);
    }
    Ok(())
}
