//! respack CLI
//!
//! Usage: respack <COMMAND>
//!
//! Commands:
//!   build   Build a package and print or write the combined content
//!   etag    Print the ETag of a package's current build
//!   list    List configured packages
//!   url     Print the versioned URL of a package
//!   watch   Rebuild packages as their sources change

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Build { key, out } => {
            commands::build::cmd_build(config_path, &key, out.as_deref(), cli.json)
        }
        Commands::Etag { key } => commands::etag::cmd_etag(config_path, &key, cli.json),
        Commands::List => commands::list::cmd_list(config_path, cli.json),
        Commands::Url { key } => commands::url::cmd_url(config_path, &key, cli.json),
        Commands::Watch { keys } => commands::watch::cmd_watch(config_path, &keys, cli.json),
    }
}

/// Logs go to stderr; `RESPACK_LOG` takes precedence over `-v`
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("RESPACK_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
