// src/commands/inspect.rs

//! Inspect command - show recipe metadata as JSON

use anyhow::{Context, Result};
use clwe_recipe::recipe::{OptionSchema, RECIPE, requirements};
use serde_json::json;

/// Print the recipe's metadata, option schema and requirements
pub fn cmd_inspect() -> Result<()> {
    let requires: Vec<_> = requirements()
        .iter()
        .map(|dep| {
            json!({
                "reference": dep.reference(),
                "target": dep.target(),
                "find_module": dep.find_module,
            })
        })
        .collect();

    let document = json!({
        "metadata": RECIPE,
        "options": OptionSchema::recipe(),
        "requires": requires,
    });

    let text = serde_json::to_string_pretty(&document).context("Failed to encode recipe")?;
    println!("{}", text);
    Ok(())
}
