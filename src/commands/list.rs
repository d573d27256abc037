use std::path::Path;

use anyhow::Result;

use super::common::{emit, open_runtime};

pub fn cmd_list(config_path: Option<&Path>, json: bool) -> Result<()> {
    let runtime = open_runtime(config_path, json)?;
    let packages = runtime.registry().packages();

    if json {
        let entries: Vec<serde_json::Value> = packages
            .iter()
            .map(|p| {
                let definition = p.definition();
                serde_json::json!({
                    "key": definition.key(),
                    "kind": definition.kind().as_str(),
                    "minify": definition.minify(),
                    "sources": definition.sources().iter().map(|s| s.as_str()).collect::<Vec<_>>(),
                })
            })
            .collect();
        emit(serde_json::json!({
            "event": "complete",
            "command": "list",
            "packages": entries,
        }))?;
        return Ok(());
    }

    if packages.is_empty() {
        println!("No packages configured.");
        return Ok(());
    }
    for package in packages {
        let definition = package.definition();
        println!(
            "{}\t{}\t{} source(s){}",
            definition.key(),
            definition.kind().as_str(),
            definition.sources().len(),
            if definition.minify() { "\tminified" } else { "" }
        );
    }
    Ok(())
}
