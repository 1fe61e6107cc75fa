// src/recipe/kitchen/tool.rs

//! The external build tool seam
//!
//! The Kitchen never spawns cmake itself; it hands each invocation to a
//! [`BuildTool`]. [`CmakeTool`] runs the real binary. Tests substitute a
//! scripted tool to fail individual phases.

use crate::error::{Error, Phase, Result};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Exit status and captured output of one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code; `None` if the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Successful output with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs one build tool invocation to completion
///
/// `Err` means the tool could not be run at all; a tool that ran and failed
/// returns `Ok` with a non-zero code.
pub trait BuildTool: Send + Sync {
    fn run(&self, phase: Phase, args: &[String], workdir: &Path) -> io::Result<ToolOutput>;
}

/// The cmake command line tool
#[derive(Debug, Clone)]
pub struct CmakeTool {
    program: PathBuf,
}

impl CmakeTool {
    /// Use an explicit cmake binary
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Use `explicit` if given, otherwise find cmake on PATH
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        if let Some(program) = explicit {
            return Ok(Self::new(program));
        }
        let program = which::which("cmake")
            .map_err(|e| Error::ToolNotFound(format!("cmake not found in PATH: {}", e)))?;
        debug!("Using cmake at {}", program.display());
        Ok(Self::new(program))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl BuildTool for CmakeTool {
    fn run(&self, phase: Phase, args: &[String], workdir: &Path) -> io::Result<ToolOutput> {
        debug!("{} phase: {} {}", phase, self.program.display(), args.join(" "));

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(workdir)
            .output()?;

        Ok(ToolOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
