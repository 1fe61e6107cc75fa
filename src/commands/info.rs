// src/commands/info.rs

//! Info command - consumer metadata for a configuration

use super::resolve_configuration;
use crate::cli::ConfigArgs;
use anyhow::{Context, Result};
use clwe_recipe::PackageInfo;

/// Print the metadata a package built for this configuration would publish
pub fn cmd_info(args: &ConfigArgs) -> Result<()> {
    let configuration = resolve_configuration(args)?;
    let info = PackageInfo::for_configuration(&configuration);
    let text = serde_json::to_string_pretty(&info).context("Failed to encode package info")?;
    println!("{}", text);
    Ok(())
}
