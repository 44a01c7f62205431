//! CLI for the fitstage train/evaluate stage

use clap::Parser;
use fitstage_cli::{Cli, commands, init_tracing};

fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_filter());

    let report = commands::run_train(&cli.config)?;
    println!("{}", report.render());
    Ok(())
}
