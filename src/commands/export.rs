// src/commands/export.rs

//! Export and generate commands - stage sources and write the toolchain

use super::{kitchen_config, planning_kitchen, resolve_configuration};
use crate::cli::{ConfigArgs, KitchenArgs};
use anyhow::{Context, Result};
use clwe_recipe::recipe::{EXPORT_GROUPS, check_inputs};
use std::path::Path;
use tracing::info;

/// Copy the recipe's sources into the export folder
pub fn cmd_export(config: &ConfigArgs, kitchen_args: &KitchenArgs) -> Result<()> {
    let source_root = Path::new(&kitchen_args.source_root);
    let configuration = resolve_configuration(config)?;
    let kitchen = planning_kitchen(kitchen_config(kitchen_args)?);

    check_inputs(source_root)
        .with_context(|| format!("Invalid source root: {}", source_root.display()))?;
    let layout = kitchen
        .export(source_root, &configuration)
        .context("Failed to export sources")?;

    println!("Exported {} source group(s) to {}", EXPORT_GROUPS.len(), layout.export_folder.display());
    Ok(())
}

/// Export sources, then write the toolchain and dependency bindings
pub fn cmd_generate(config: &ConfigArgs, kitchen_args: &KitchenArgs) -> Result<()> {
    let source_root = Path::new(&kitchen_args.source_root);
    let configuration = resolve_configuration(config)?;
    let kitchen = planning_kitchen(kitchen_config(kitchen_args)?);

    check_inputs(source_root)
        .with_context(|| format!("Invalid source root: {}", source_root.display()))?;
    let layout = kitchen
        .export(source_root, &configuration)
        .context("Failed to export sources")?;
    let toolchain = kitchen
        .generate(&configuration, &layout)
        .context("Failed to generate toolchain")?;

    println!("Toolchain: {}", toolchain.toolchain_path().display());
    for binding in &toolchain.bindings {
        println!(
            "  {} {} -> {}",
            binding.name,
            binding.version,
            toolchain.generators_folder.join(binding.config_file_name()).display()
        );
    }

    info!(
        "Generated toolchain for configuration {}",
        configuration.short_id()
    );
    Ok(())
}
