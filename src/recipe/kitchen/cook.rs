// src/recipe/kitchen/cook.rs

//! Cook: build and package execution for a single configuration

use crate::error::{Error, PackagingStage, Phase, Result};
use crate::recipe::layout::{LICENSE_FILE, LayoutPlan};
use crate::recipe::resolve::Configuration;
use std::fs;
use std::path::Path;
use tracing::info;

use super::Kitchen;
use super::tool::ToolOutput;

/// A single cook operation
pub struct Cook<'a> {
    pub(super) kitchen: &'a Kitchen,
    pub(super) configuration: &'a Configuration,
    pub(super) layout: &'a LayoutPlan,
    /// Build log accumulator
    pub(super) log: String,
}

impl<'a> Cook<'a> {
    pub fn new(kitchen: &'a Kitchen, configuration: &'a Configuration, layout: &'a LayoutPlan) -> Self {
        Self {
            kitchen,
            configuration,
            layout,
            log: String::new(),
        }
    }

    pub fn into_log(self) -> String {
        self.log
    }

    fn build_type(&self) -> String {
        self.configuration.settings.build_type.to_string()
    }

    /// Arguments for the configure phase
    pub fn configure_args(&self, toolchain_file: &Path) -> Vec<String> {
        let mut args = vec![
            "-S".to_string(),
            self.layout.export_folder.display().to_string(),
            "-B".to_string(),
            self.layout.build_folder.display().to_string(),
            format!("-DCMAKE_TOOLCHAIN_FILE={}", toolchain_file.display()),
            format!(
                "-DCMAKE_INSTALL_PREFIX={}",
                self.layout.package_folder.display()
            ),
        ];
        if let Some(generator) = &self.kitchen.config.generator {
            args.push("-G".to_string());
            args.push(generator.clone());
        }
        args
    }

    /// Arguments for the build phase
    pub fn build_args(&self) -> Vec<String> {
        vec![
            "--build".to_string(),
            self.layout.build_folder.display().to_string(),
            "--config".to_string(),
            self.build_type(),
            "--parallel".to_string(),
            self.kitchen.config.jobs.max(1).to_string(),
        ]
    }

    /// Arguments for the install phase
    pub fn install_args(&self) -> Vec<String> {
        vec![
            "--install".to_string(),
            self.layout.build_folder.display().to_string(),
            "--config".to_string(),
            self.build_type(),
            "--prefix".to_string(),
            self.layout.package_folder.display().to_string(),
        ]
    }

    /// Configure, then build
    ///
    /// A failed configure stops before the build phase.
    pub fn build(&mut self, toolchain_file: &Path) -> Result<()> {
        fs::create_dir_all(&self.layout.build_folder)?;

        let args = self.configure_args(toolchain_file);
        self.run_build_phase(Phase::Configure, &args)?;

        let args = self.build_args();
        self.run_build_phase(Phase::Build, &args)
    }

    /// Install artifacts, then stage the license
    ///
    /// Either half failing is a packaging failure naming that half.
    pub fn package(&mut self, source_root: &Path) -> Result<()> {
        fs::create_dir_all(&self.layout.package_folder).map_err(|e| Error::PackagingFailure {
            stage: PackagingStage::Install,
            message: format!(
                "cannot create {}: {}",
                self.layout.package_folder.display(),
                e
            ),
        })?;

        let args = self.install_args();
        let output = self
            .run_phase(Phase::Install, &args)
            .map_err(|e| Error::PackagingFailure {
                stage: PackagingStage::Install,
                message: e.to_string(),
            })?;
        if !output.success() {
            return Err(Error::PackagingFailure {
                stage: PackagingStage::Install,
                message: format!("exit code {:?}\nstderr: {}", output.code, output.stderr),
            });
        }

        self.copy_license(source_root)
    }

    fn copy_license(&mut self, source_root: &Path) -> Result<()> {
        let from = source_root.join(LICENSE_FILE);
        let licenses = self.layout.licenses_folder();
        let to = licenses.join(LICENSE_FILE);

        fs::create_dir_all(&licenses)
            .and_then(|_| fs::copy(&from, &to))
            .map_err(|e| Error::PackagingFailure {
                stage: PackagingStage::License,
                message: format!("{} -> {}: {}", from.display(), to.display(), e),
            })?;

        self.log_line(&format!("Copied license to {}", to.display()));
        info!("Packaged license into {}", licenses.display());
        Ok(())
    }

    fn run_build_phase(&mut self, phase: Phase, args: &[String]) -> Result<()> {
        let output = self.run_phase(phase, args).map_err(|e| Error::BuildFailure {
            phase,
            code: None,
            stderr: e.to_string(),
        })?;
        if !output.success() {
            return Err(Error::BuildFailure {
                phase,
                code: output.code,
                stderr: output.stderr,
            });
        }
        Ok(())
    }

    /// Run one phase through the kitchen's build tool, logging its output
    fn run_phase(&mut self, phase: Phase, args: &[String]) -> std::io::Result<ToolOutput> {
        info!("Running {} phase", phase);
        let output = self
            .kitchen
            .tool
            .run(phase, args, &self.layout.build_folder)?;
        self.log_build_output(phase, &output);
        Ok(output)
    }

    fn log_line(&mut self, line: &str) {
        self.log.push_str(line);
        self.log.push('\n');
    }

    /// Log build step output (stdout/stderr) with a phase header
    fn log_build_output(&mut self, phase: Phase, output: &ToolOutput) {
        self.log_line(&format!("=== {} ===", phase));
        if !output.stdout.is_empty() {
            self.log.push_str(&output.stdout);
            self.log.push('\n');
        }
        if !output.stderr.is_empty() {
            self.log.push_str(&output.stderr);
            self.log.push('\n');
        }
    }
}
