// src/recipe/mod.rs

//! Build recipe for the CLWE key-encapsulation library
//!
//! The recipe turns user options into a concrete build plan, drives CMake
//! through it and publishes metadata for consumers of the package. The
//! cryptographic sources themselves are opaque: they are copied and built,
//! never inspected.
//!
//! # Pipeline
//!
//! ```text
//! options ─► resolve ─► layout / requirements / toolchain ─► build ─► package ─► package_info
//! ```
//!
//! # Terminology
//!
//! - **Recipe**: the options, settings and requirements of the library
//! - **Kitchen**: owns the work directory and the build tool
//! - **Cook**: one build of one resolved configuration
//!
//! # Example
//!
//! ```no_run
//! use clwe_recipe::recipe::{Kitchen, KitchenConfig, OptionName, RawOptions, Settings};
//! use std::path::Path;
//!
//! # fn main() -> clwe_recipe::Result<()> {
//! let kitchen = Kitchen::with_cmake(KitchenConfig::default())?;
//! let raw = RawOptions::new().with(OptionName::WithTests, true);
//! let configuration = kitchen.resolve(&Settings::detect()?, &raw)?;
//! let result = kitchen.cook(Path::new("."), &configuration)?;
//! println!("{}", result.package_info.cmake_target_name);
//! # Ok(())
//! # }
//! ```

mod kitchen;
pub mod layout;
pub mod metadata;
pub mod options;
pub mod package_info;
pub mod profile;
pub mod requirements;
pub mod resolve;
pub mod settings;
pub mod toolchain;

pub use kitchen::{BuildTool, CmakeTool, Cook, CookResult, Kitchen, KitchenConfig, ToolOutput};
pub use layout::{ArtifactGroup, EXPORT_GROUPS, LayoutPlan, check_inputs, export_sources};
pub use metadata::{RECIPE, RecipeMetadata};
pub use options::{OptionDecl, OptionName, OptionSchema, RawOptions};
pub use package_info::PackageInfo;
pub use profile::{Profile, parse_profile, parse_profile_file};
pub use requirements::{DependencySpec, requirements};
pub use resolve::{Configuration, resolve, resolve_checked};
pub use settings::{Arch, BuildType, Compiler, Os, Settings};
pub use toolchain::{DependencyBinding, Toolchain};
