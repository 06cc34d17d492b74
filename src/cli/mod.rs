// src/cli/mod.rs — CLI definition (clap derive)

pub mod lookup;
pub mod serve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::infra::config::Config;

#[derive(Parser)]
#[command(
    name = "capitals",
    about = "Capital-city lookup service backed by Azure OpenAI",
    version
)]
pub struct Cli {
    /// Config file path (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Address to bind (overrides [server].host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides [server].port)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Maximum cached lookups (overrides [cache].capacity)
    #[arg(long)]
    pub cache_capacity: Option<usize>,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve,
    /// Resolve one country from the terminal and exit
    Lookup {
        /// Country name
        #[arg(trailing_var_arg = true, required = true)]
        country: Vec<String>,
    },
    /// Show how the input filter judges some text, without calling the model
    Classify {
        #[arg(trailing_var_arg = true, required = true)]
        text: Vec<String>,
    },
}

impl Cli {
    /// Fold command-line overrides into a loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref host) = self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(capacity) = self.cache_capacity {
            config.cache.capacity = capacity;
        }
    }
}
