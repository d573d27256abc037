use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// respack - combine, minify and version script and stylesheet packages
#[derive(Parser, Debug)]
#[command(name = "respack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: ./respack.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a package and print or write the combined content
    Build {
        /// Package key
        key: String,

        /// Write the artifact here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the ETag of a package's current build
    Etag {
        /// Package key
        key: String,
    },

    /// List configured packages
    List,

    /// Print the versioned URL of a package
    Url {
        /// Package key
        key: String,
    },

    /// Rebuild packages as their sources change (Ctrl+C to stop)
    Watch {
        /// Only these packages (default: all)
        keys: Vec<String>,
    },
}
