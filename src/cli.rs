use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::upstream::DEFAULT_BASE_URL;

#[derive(Parser, Debug)]
#[command(name = "pokedex-catalog")]
#[command(version, about = "Ingest the PokeAPI catalog into SQLite and serve it over HTTP")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the upstream catalog and persist it to SQLite
    Ingest {
        /// Output SQLite database path
        output_db: PathBuf,

        /// Listing offset to start from
        #[arg(short, long, default_value_t = 0)]
        offset: u32,

        /// Maximum number of listing entries to fetch
        #[arg(short, long, default_value_t = 2000)]
        limit: u32,

        /// Upstream API base URL
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },

    /// Serve the catalog HTTP API over an existing database
    Serve {
        /// SQLite database path produced by `ingest`
        db: PathBuf,

        /// Address to bind
        #[arg(short, long, default_value = "127.0.0.1:8080")]
        bind: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
