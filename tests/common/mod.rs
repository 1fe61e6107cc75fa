// tests/common/mod.rs

//! Shared test utilities: a recipe source tree and a scripted build tool.

#![allow(dead_code)]

use clwe_recipe::recipe::{BuildTool, ToolOutput};
use clwe_recipe::{Kitchen, KitchenConfig, Phase};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Create a recipe source tree with every exported group and a LICENSE.
///
/// Returns the TempDir; keep it alive to prevent cleanup.
pub fn source_tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(
        root.join("CMakeLists.txt"),
        "cmake_minimum_required(VERSION 3.16)\nproject(CLWE CXX)\n",
    )
    .unwrap();
    fs::create_dir_all(root.join("cmake")).unwrap();
    fs::write(root.join("cmake/CLWEConfig.cmake.in"), "@PACKAGE_INIT@\n").unwrap();
    fs::create_dir_all(root.join("src/core")).unwrap();
    fs::write(root.join("src/core/clwe.cpp"), "// kem\n").unwrap();
    fs::write(root.join("src/core/color_kem.cpp"), "// color kem\n").unwrap();
    fs::write(root.join("demo_kem.cpp"), "int main() { return 0; }\n").unwrap();
    fs::write(
        root.join("benchmark_color_kem_timing.cpp"),
        "int main() { return 0; }\n",
    )
    .unwrap();
    fs::write(root.join("LICENSE"), "Apache License 2.0\n").unwrap();

    dir
}

/// A build tool that records invocations and fails a chosen phase.
///
/// A successful install lays out `include/` and `lib/` under the prefix,
/// the way `cmake --install` would.
#[derive(Default)]
pub struct ScriptedTool {
    fail_phase: Option<Phase>,
    unavailable: bool,
    calls: Mutex<Vec<(Phase, Vec<String>)>>,
}

impl ScriptedTool {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Exit non-zero in `phase`
    pub fn failing(phase: Phase) -> Arc<Self> {
        Arc::new(Self {
            fail_phase: Some(phase),
            ..Default::default()
        })
    }

    /// Fail to start at all, like a missing binary
    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            unavailable: true,
            ..Default::default()
        })
    }

    pub fn phases(&self) -> Vec<Phase> {
        self.calls.lock().unwrap().iter().map(|(p, _)| *p).collect()
    }

    pub fn args(&self, phase: Phase) -> Option<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| *p == phase)
            .map(|(_, a)| a.clone())
    }
}

impl BuildTool for ScriptedTool {
    fn run(&self, phase: Phase, args: &[String], _workdir: &Path) -> io::Result<ToolOutput> {
        self.calls.lock().unwrap().push((phase, args.to_vec()));

        if self.unavailable {
            return Err(io::Error::new(io::ErrorKind::NotFound, "cmake: not found"));
        }
        if self.fail_phase == Some(phase) {
            return Ok(ToolOutput {
                code: Some(2),
                stdout: String::new(),
                stderr: format!("{} step failed", phase),
            });
        }

        if phase == Phase::Install {
            if let Some(prefix) = prefix_arg(args) {
                fs::create_dir_all(prefix.join("include/clwe"))?;
                fs::write(prefix.join("include/clwe/clwe.hpp"), "#pragma once\n")?;
                fs::create_dir_all(prefix.join("lib"))?;
                fs::write(prefix.join("lib/libclwe_avx.a"), "")?;
            }
        }
        Ok(ToolOutput::ok(format!("{} done", phase)))
    }
}

fn prefix_arg(args: &[String]) -> Option<PathBuf> {
    args.iter()
        .position(|a| a == "--prefix")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

/// A Kitchen rooted in `work_dir` driving the given tool
pub fn kitchen(work_dir: &Path, tool: Arc<ScriptedTool>) -> Kitchen {
    let config = KitchenConfig {
        jobs: 2,
        ..Default::default()
    }
    .with_work_dir(work_dir);
    Kitchen::new(config, tool)
}
