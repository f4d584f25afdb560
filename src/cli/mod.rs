pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "headliner")]
#[command(about = "Serves a periodically refreshed ranking of top stories", long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ~/.config/headliner/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of item requests allowed in flight at once
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Keep the snapshot fresh and serve it over HTTP
    Serve {
        /// Address to listen on, overriding the config file
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Build one snapshot and print it
    Fetch {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Also write the snapshot as pretty-printed JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
