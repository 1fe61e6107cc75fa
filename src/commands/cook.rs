// src/commands/cook.rs

//! Cook command - build and package the library for one configuration

use super::{kitchen_config, print_configuration, resolve_configuration};
use crate::cli::{ConfigArgs, KitchenArgs};
use anyhow::{Context, Result};
use clwe_recipe::Kitchen;
use std::path::{Path, PathBuf};
use tracing::info;

/// Cook the library
///
/// # Arguments
/// * `config` - Profile, setting and option overrides
/// * `kitchen_args` - Source root, work directory and kitchen config file
/// * `cmake` - Explicit cmake binary (None = found on PATH)
/// * `generator` - CMake generator (None = cmake's default)
/// * `jobs` - Number of parallel build jobs (None = auto)
/// * `show_log` - Print the captured build log on success
pub fn cmd_cook(
    config: &ConfigArgs,
    kitchen_args: &KitchenArgs,
    cmake: Option<&str>,
    generator: Option<&str>,
    jobs: Option<u32>,
    show_log: bool,
) -> Result<()> {
    let source_root = Path::new(&kitchen_args.source_root);

    let mut kitchen_config = kitchen_config(kitchen_args)?;
    if let Some(cmake) = cmake {
        kitchen_config.cmake = Some(PathBuf::from(cmake));
    }
    if let Some(generator) = generator {
        kitchen_config.generator = Some(generator.to_string());
    }
    if let Some(j) = jobs {
        kitchen_config.jobs = j;
    }

    let configuration = resolve_configuration(config)?;
    print_configuration(&configuration);

    let kitchen = Kitchen::with_cmake(kitchen_config).context("Cannot run the build tool")?;
    println!("Cooking with {} parallel jobs...", kitchen.config().jobs);

    let result = kitchen
        .cook(source_root, &configuration)
        .with_context(|| format!("Failed to cook configuration {}", configuration.short_id()))?;

    if show_log {
        println!("\n{}", result.log);
    }

    println!("\n[COMPLETE] Cooked: {}", result.layout.package_folder.display());
    println!("  Library: {}", result.package_info.library_files.join(", "));
    println!("  CMake target: {}", result.package_info.cmake_target_name);
    println!("  Metadata: {}", result.package_info_path.display());

    info!(
        "Successfully cooked {} to {}",
        result.package_info.reference,
        result.layout.package_folder.display()
    );

    Ok(())
}
