// src/cli.rs
//! CLI definitions for the CLWE build recipe
//!
//! This module contains the command-line interface definitions using clap.
//! The command implementations are in the `commands` module.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "clwe-recipe")]
#[command(author, version)]
#[command(about = "Configure, build and package the Cryptopix-CLWE library", long_about = None)]
pub struct Cli {
    /// Verbose logging (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that resolves a configuration
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Profile file with [settings] and [options] tables
    #[arg(long)]
    pub profile: Option<String>,

    /// Setting override, e.g. -s os=Windows (repeatable)
    #[arg(short = 's', long = "setting", value_name = "NAME=VALUE")]
    pub settings: Vec<String>,

    /// Option override, e.g. -o shared=True (repeatable)
    #[arg(short = 'o', long = "option", value_name = "NAME=VALUE")]
    pub options: Vec<String>,
}

/// Options for commands that touch the work directory
#[derive(Args, Debug, Clone)]
pub struct KitchenArgs {
    /// Kitchen configuration file (TOML)
    #[arg(long)]
    pub config: Option<String>,

    /// Work directory for export, build and package folders
    #[arg(long)]
    pub work_dir: Option<String>,

    /// Recipe source root containing CMakeLists.txt
    #[arg(long, default_value = ".")]
    pub source_root: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show recipe metadata and declared options
    Inspect,

    /// Resolve options for a platform and show the configuration
    Resolve {
        #[command(flatten)]
        config: ConfigArgs,

        /// Work directory used to show the folder layout
        #[arg(long)]
        work_dir: Option<String>,
    },

    /// Copy recipe sources into the export folder
    Export {
        #[command(flatten)]
        config: ConfigArgs,

        #[command(flatten)]
        kitchen: KitchenArgs,
    },

    /// Export sources and write the toolchain and dependency bindings
    Generate {
        #[command(flatten)]
        config: ConfigArgs,

        #[command(flatten)]
        kitchen: KitchenArgs,
    },

    /// Run the full pipeline: export, generate, build, package
    Cook {
        #[command(flatten)]
        config: ConfigArgs,

        #[command(flatten)]
        kitchen: KitchenArgs,

        /// Path to the cmake binary (default: found on PATH)
        #[arg(long)]
        cmake: Option<String>,

        /// CMake generator, e.g. Ninja
        #[arg(short = 'G', long)]
        generator: Option<String>,

        /// Number of parallel build jobs
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        jobs: Option<u32>,

        /// Print the build log after a successful cook
        #[arg(long)]
        show_log: bool,
    },

    /// Show the metadata consumers see for a configuration
    Info {
        #[command(flatten)]
        config: ConfigArgs,
    },
}
