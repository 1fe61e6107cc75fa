// src/recipe/package_info.rs

//! Consumer metadata
//!
//! What a downstream build needs to find and link the package. The CMake
//! names are fixed; only the library file underneath changes with the
//! configuration.

use super::metadata::RECIPE;
use super::requirements::requirements;
use super::resolve::Configuration;
use super::settings::Os;
use crate::error::{Error, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Library produced by the build
pub const LIBRARY_NAME: &str = "clwe_avx";
/// Package name for `find_package`
pub const CMAKE_FILE_NAME: &str = "CLWE";
/// Target consumers link against
pub const CMAKE_TARGET_NAME: &str = "CLWE::clwe";
/// File the metadata is written to inside the package folder
pub const PACKAGE_INFO_FILE: &str = "clwe-package-info.json";

/// A transitive requirement advertised to consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequiredTarget {
    /// Requirement name, e.g. `openssl`
    pub name: String,
    /// Target to link, e.g. `openssl::openssl`
    pub target: String,
    /// Pinned reference, e.g. `openssl/3.1.0`
    pub reference: String,
    pub version: String,
}

/// Exported package description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    pub reference: String,
    pub package_id: String,
    pub libs: Vec<String>,
    pub includedirs: Vec<String>,
    pub libdirs: Vec<String>,
    /// Library files for this configuration, relative to the lib dir
    pub library_files: Vec<String>,
    pub cmake_file_name: String,
    pub cmake_target_name: String,
    pub requires: Vec<RequiredTarget>,
}

impl PackageInfo {
    /// Describe the package built from a configuration
    pub fn for_configuration(configuration: &Configuration) -> Self {
        Self {
            reference: RECIPE.reference(),
            package_id: configuration.package_id(),
            libs: vec![LIBRARY_NAME.to_string()],
            includedirs: vec!["include".to_string()],
            libdirs: vec!["lib".to_string()],
            library_files: library_files(LIBRARY_NAME, configuration),
            cmake_file_name: CMAKE_FILE_NAME.to_string(),
            cmake_target_name: CMAKE_TARGET_NAME.to_string(),
            requires: requirements()
                .iter()
                .map(|dep| RequiredTarget {
                    name: dep.name.to_string(),
                    target: dep.target(),
                    reference: dep.reference(),
                    version: dep.version.to_string(),
                })
                .collect(),
        }
    }

    /// Versions advertised for each requirement, by name
    pub fn advertised_versions(&self) -> Vec<(String, String)> {
        self.requires
            .iter()
            .map(|r| (r.name.clone(), r.version.clone()))
            .collect()
    }

    /// Write the metadata as JSON into the package folder
    pub fn write(&self, package_folder: &Path) -> Result<PathBuf> {
        fs::create_dir_all(package_folder)?;
        let path = package_folder.join(PACKAGE_INFO_FILE);
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::IoError(format!("Failed to encode package info: {}", e)))?;
        fs::write(&path, json)?;
        info!("Wrote consumer metadata to {}", path.display());
        Ok(path)
    }
}

/// Platform file names for a library
///
/// Windows shared builds produce both the DLL and its import library.
pub fn library_files(name: &str, configuration: &Configuration) -> Vec<String> {
    match (configuration.settings.os, configuration.shared) {
        (Os::Windows, false) => vec![format!("{}.lib", name)],
        (Os::Windows, true) => vec![format!("{}.dll", name), format!("{}.lib", name)],
        (Os::Macos, true) => vec![format!("lib{}.dylib", name)],
        (_, true) => vec![format!("lib{}.so", name)],
        (_, false) => vec![format!("lib{}.a", name)],
    }
}
