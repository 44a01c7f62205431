//! fitstage CLI library

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub mod commands;
pub mod error;

/// Fit an elastic net on the training split and score it on the test split
#[derive(Parser, Debug)]
#[command(name = "fitstage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Stage configuration file (YAML, JSON or TOML)
    #[arg(short, long, default_value = "params.yaml")]
    pub config: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "FITSTAGE_LOG", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Tracing filter for the fitstage crates at the requested level
    pub fn log_filter(&self) -> String {
        ["fitstage", "fitstage_core", "fitstage_linear", "fitstage_cli"]
            .iter()
            .map(|target| format!("{}={}", target, self.log_level))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Install the fmt subscriber; `RUST_LOG` takes precedence over `filter`
pub fn init_tracing(filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
