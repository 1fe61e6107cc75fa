// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; -v raises the default from info to debug
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    match cli.command {
        Commands::Inspect => commands::cmd_inspect(),
        Commands::Resolve { config, work_dir } => {
            commands::cmd_resolve(&config, work_dir.as_deref())
        }
        Commands::Export { config, kitchen } => commands::cmd_export(&config, &kitchen),
        Commands::Generate { config, kitchen } => commands::cmd_generate(&config, &kitchen),
        Commands::Cook {
            config,
            kitchen,
            cmake,
            generator,
            jobs,
            show_log,
        } => commands::cmd_cook(
            &config,
            &kitchen,
            cmake.as_deref(),
            generator.as_deref(),
            jobs,
            show_log,
        ),
        Commands::Info { config } => commands::cmd_info(&config),
    }
}
