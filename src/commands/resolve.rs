// src/commands/resolve.rs

//! Resolve command - show the resolved configuration for a platform

use super::{load_kitchen_config, print_configuration, resolve_configuration};
use crate::cli::ConfigArgs;
use anyhow::Result;
use clwe_recipe::recipe::LayoutPlan;

/// Resolve options and print the configuration, package id and folder layout
pub fn cmd_resolve(args: &ConfigArgs, work_dir: Option<&str>) -> Result<()> {
    let configuration = resolve_configuration(args)?;
    print_configuration(&configuration);
    println!("Package id: {}", configuration.package_id());

    let kitchen_config = load_kitchen_config(None, work_dir)?;
    let layout = LayoutPlan::new(&kitchen_config.work_dir, &configuration);
    println!("\nLayout:");
    println!("  export:     {}", layout.export_folder.display());
    println!("  build:      {}", layout.build_folder.display());
    println!("  generators: {}", layout.generators_folder.display());
    println!("  package:    {}", layout.package_folder.display());
    if layout.multi_config {
        println!("  (multi-configuration build; build type chosen at build time)");
    }

    Ok(())
}
