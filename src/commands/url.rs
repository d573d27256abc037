use std::path::Path;

use anyhow::Result;

use super::common::{emit, open_runtime};

pub fn cmd_url(config_path: Option<&Path>, key: &str, json: bool) -> Result<()> {
    let runtime = open_runtime(config_path, json)?;
    let package = runtime.package(key)?;
    let url = runtime.router().url_for(runtime.cache(), &package)?;
    let tag = runtime.router().tag_for(runtime.cache(), &package)?;

    if json {
        emit(serde_json::json!({
            "event": "complete",
            "command": "url",
            "package": key,
            "url": url,
            "tag": tag,
        }))?;
    } else {
        println!("{}", url);
    }
    Ok(())
}
