// src/recipe/layout.rs

//! Folder layout and source export
//!
//! Export copies the relocatable parts of the source tree into an export
//! root that the build then runs from. The layout follows the usual CMake
//! arrangement: one build folder per build type for single-configuration
//! generators, one shared build folder for multi-configuration generators.

use super::resolve::Configuration;
use crate::error::{Error, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Name of the license file staged into the package
pub const LICENSE_FILE: &str = "LICENSE";

/// A group of sources copied on export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactGroup {
    /// A single file at the source root
    File(&'static str),
    /// A directory copied recursively
    Tree(&'static str),
}

/// Groups exported for every build, in copy order
pub const EXPORT_GROUPS: &[ArtifactGroup] = &[
    ArtifactGroup::File("CMakeLists.txt"),
    ArtifactGroup::Tree("cmake"),
    ArtifactGroup::Tree("src"),
    ArtifactGroup::File("demo_kem.cpp"),
    ArtifactGroup::File("benchmark_color_kem_timing.cpp"),
];

impl ArtifactGroup {
    /// Path of the group relative to the source root
    pub fn name(&self) -> &'static str {
        match self {
            Self::File(name) | Self::Tree(name) => name,
        }
    }

    /// Check that the group exists under `root` with the right kind
    pub fn locate(&self, root: &Path) -> Result<PathBuf> {
        let path = root.join(self.name());
        let present = match self {
            Self::File(_) => path.is_file(),
            Self::Tree(_) => path.is_dir(),
        };
        if !present {
            return Err(Error::MissingArtifact {
                group: self.name().to_string(),
                path,
            });
        }
        Ok(path)
    }
}

/// Verify every input the build needs exists at the source root
///
/// Covers the export groups and the license file.
pub fn check_inputs(source_root: &Path) -> Result<()> {
    for group in EXPORT_GROUPS {
        group.locate(source_root)?;
    }
    let license = source_root.join(LICENSE_FILE);
    if !license.is_file() {
        return Err(Error::MissingArtifact {
            group: LICENSE_FILE.to_string(),
            path: license,
        });
    }
    Ok(())
}

/// Copy the export groups from `source_root` into `export_root`
///
/// All groups are checked before anything is copied, so a missing group
/// leaves the export root untouched. Files outside the groups are never
/// removed. Returns the number of files copied.
pub fn export_sources(source_root: &Path, export_root: &Path) -> Result<usize> {
    let located: Vec<(ArtifactGroup, PathBuf)> = EXPORT_GROUPS
        .iter()
        .map(|g| g.locate(source_root).map(|p| (*g, p)))
        .collect::<Result<_>>()?;

    fs::create_dir_all(export_root)?;

    let mut copied = 0;
    for (group, path) in located {
        let dest = export_root.join(group.name());
        copied += match group {
            ArtifactGroup::File(_) => {
                copy_file(&path, &dest)?;
                1
            }
            ArtifactGroup::Tree(_) => copy_tree(&path, &dest)?,
        };
        debug!("Exported {}", group.name());
    }

    info!(
        "Exported {} file(s) from {} to {}",
        copied,
        source_root.display(),
        export_root.display()
    );
    Ok(copied)
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(from, to).map_err(|e| {
        Error::IoError(format!(
            "Failed to copy {} to {}: {}",
            from.display(),
            to.display(),
            e
        ))
    })?;
    Ok(())
}

fn copy_tree(from: &Path, to: &Path) -> Result<usize> {
    let mut copied = 0;
    for entry in WalkDir::new(from).follow_links(true) {
        let entry = entry.map_err(|e| {
            Error::IoError(format!("Failed to walk {}: {}", from.display(), e))
        })?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| Error::IoError(e.to_string()))?;
        let dest = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)?;
        } else {
            copy_file(entry.path(), &dest)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// On-disk folders for one configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutPlan {
    /// Exported sources; the build's source folder
    pub export_folder: PathBuf,
    /// CMake binary directory
    pub build_folder: PathBuf,
    /// Generated toolchain and dependency bindings
    pub generators_folder: PathBuf,
    /// Install prefix and final package root
    pub package_folder: PathBuf,
    /// Whether the build type is chosen at build time rather than configure time
    pub multi_config: bool,
}

impl LayoutPlan {
    /// Plan folders under `work_dir` for a configuration
    pub fn new(work_dir: &Path, configuration: &Configuration) -> Self {
        let id = configuration.short_id();
        let multi_config = configuration.settings.compiler.is_multi_config();

        let mut build_folder = work_dir.join("b").join(&id).join("build");
        if !multi_config {
            build_folder.push(configuration.settings.build_type.to_string());
        }
        let generators_folder = build_folder.join("generators");

        Self {
            export_folder: work_dir.join("export"),
            build_folder,
            generators_folder,
            package_folder: work_dir.join("p").join(&id),
            multi_config,
        }
    }

    /// Where the license file lands in the package
    pub fn licenses_folder(&self) -> PathBuf {
        self.package_folder.join("licenses")
    }
}
