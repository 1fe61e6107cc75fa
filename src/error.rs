// src/error.rs

//! Error types for recipe resolution, export, build and packaging

use std::fmt;
use std::path::PathBuf;
use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Phase of an external build tool invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    /// Generate the native build system
    Configure,
    /// Compile the configured tree
    Build,
    /// Install artifacts into the package folder
    Install,
}

/// Which half of packaging failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackagingStage {
    /// Staging compiled artifacts with the build tool's install step
    Install,
    /// Copying the license file into `licenses/`
    License,
}

impl fmt::Display for PackagingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Install => write!(f, "artifact install"),
            Self::License => write!(f, "license copy"),
        }
    }
}

/// Errors raised by the recipe pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// A required source path for export or build is absent
    #[error("missing required artifact `{group}` at {}", path.display())]
    MissingArtifact { group: String, path: PathBuf },

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    /// The configure or build step exited unsuccessfully
    #[error("{phase} phase failed with exit code {code:?}\nstderr: {stderr}")]
    BuildFailure {
        phase: Phase,
        code: Option<i32>,
        stderr: String,
    },

    /// Install or license copy failed
    #[error("packaging failed during {stage}: {message}")]
    PackagingFailure {
        stage: PackagingStage,
        message: String,
    },

    #[error("build tool not found: {0}")]
    ToolNotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Pipeline stage the error belongs to, for diagnostics
    pub fn stage(&self) -> &'static str {
        match self {
            Self::MissingArtifact { .. } => "export",
            Self::InvalidOption(_) | Self::InvalidSetting(_) | Self::ParseError(_) => "resolve",
            Self::BuildFailure { .. } | Self::ToolNotFound(_) => "build",
            Self::PackagingFailure { .. } => "package",
            Self::IoError(_) | Self::Io(_) => "io",
        }
    }
}
