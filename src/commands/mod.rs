// src/commands/mod.rs
//! Command handlers for the clwe-recipe CLI

mod cook;
mod export;
mod info;
mod inspect;
mod resolve;

pub use cook::cmd_cook;
pub use export::{cmd_export, cmd_generate};
pub use info::cmd_info;
pub use inspect::cmd_inspect;
pub use resolve::cmd_resolve;

use crate::cli::{ConfigArgs, KitchenArgs};
use anyhow::{Context, Result};
use clwe_recipe::recipe::{
    CmakeTool, OptionSchema, Profile, RawOptions, Settings, parse_profile_file, resolve_checked,
};
use clwe_recipe::{Configuration, Kitchen, KitchenConfig};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Settings and raw options from a profile and command-line overrides
///
/// `-s` / `-o` override the profile; the host fills in only the axes neither
/// names.
pub fn load_inputs(args: &ConfigArgs) -> Result<(Settings, RawOptions)> {
    let profile = match &args.profile {
        Some(path) => parse_profile_file(Path::new(path))
            .with_context(|| format!("Failed to load profile: {}", path))?,
        None => Profile::default(),
    };
    let profile = profile
        .with_overrides(&args.settings, &args.options)
        .context("Invalid command-line override")?;

    let settings = profile.settings().context("Invalid settings")?;
    let raw = profile.raw_options().context("Invalid options")?;

    debug!("Inputs: {:?} {:?}", settings, raw);
    Ok((settings, raw))
}

/// Kitchen configuration from `--config`, with `--work-dir` taking precedence
pub fn load_kitchen_config(config: Option<&str>, work_dir: Option<&str>) -> Result<KitchenConfig> {
    let mut kitchen_config = match config {
        Some(path) => KitchenConfig::from_file(Path::new(path))
            .with_context(|| format!("Failed to load kitchen config: {}", path))?,
        None => KitchenConfig::default(),
    };
    if let Some(dir) = work_dir {
        kitchen_config = kitchen_config.with_work_dir(dir);
    }
    Ok(kitchen_config)
}

/// Resolve the configuration a command operates on
pub fn resolve_configuration(args: &ConfigArgs) -> Result<Configuration> {
    let (settings, raw) = load_inputs(args)?;
    resolve_checked(&OptionSchema::recipe(), &settings, &raw).context("Failed to resolve options")
}

/// A Kitchen for stages that never invoke cmake (export, generate)
pub fn planning_kitchen(config: KitchenConfig) -> Kitchen {
    let program = config.cmake.clone().unwrap_or_else(|| "cmake".into());
    Kitchen::new(config, Arc::new(CmakeTool::new(program)))
}

/// Kitchen configuration for commands that take [`KitchenArgs`]
pub fn kitchen_config(args: &KitchenArgs) -> Result<KitchenConfig> {
    load_kitchen_config(args.config.as_deref(), args.work_dir.as_deref())
}

/// Print a configuration summary in the style shared by every command
pub fn print_configuration(configuration: &Configuration) {
    let settings = &configuration.settings;
    println!(
        "Configuration: {} ({} {} {} {})",
        configuration.short_id(),
        settings.os,
        settings.arch,
        settings.compiler,
        settings.build_type
    );
    println!("  shared: {}", configuration.shared);
    match configuration.fpic {
        Some(fpic) => println!("  fPIC: {}", fpic),
        None => println!("  fPIC: (removed)"),
    }
    println!("  with_python: {}", configuration.with_python);
    println!("  with_tests: {}", configuration.with_tests);
    println!("  with_benchmarks: {}", configuration.with_benchmarks);
}
