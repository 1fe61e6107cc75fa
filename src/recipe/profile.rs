// src/recipe/profile.rs

//! Build profiles: settings and option values read from TOML
//!
//! ```toml
//! [settings]
//! os = "Linux"
//! arch = "x86_64"
//! compiler = "gcc"
//! build_type = "Release"
//!
//! [options]
//! shared = true
//! with_tests = true
//! ```

use super::options::{OptionName, RawOptions, parse_bool};
use super::settings::{Compiler, Settings, detect_arch, detect_os, parse_setting};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Settings as written in a profile; every axis is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileSettings {
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub compiler: Option<String>,
    #[serde(default)]
    pub build_type: Option<String>,
    #[serde(default)]
    pub arch: Option<String>,
}

/// A parsed profile
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    #[serde(default)]
    pub settings: ProfileSettings,
    #[serde(default)]
    pub options: BTreeMap<String, bool>,
}

/// Parse a profile from a TOML string
pub fn parse_profile(content: &str) -> Result<Profile> {
    toml::from_str(content).map_err(|e| Error::ParseError(format!("Invalid profile: {}", e)))
}

/// Parse a profile from a file
pub fn parse_profile_file(path: &Path) -> Result<Profile> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::IoError(format!("Failed to read profile {}: {}", path.display(), e)))?;

    parse_profile(&content)
}

impl Profile {
    /// Layer command-line `name=value` assignments over this profile
    ///
    /// Setting assignments replace the profile's value for that axis, so
    /// `os=Windows` without `compiler` picks msvc the same way a profile does.
    pub fn with_overrides(mut self, settings: &[String], options: &[String]) -> Result<Self> {
        for assignment in settings {
            let (name, value) = split_assignment(assignment)?;
            let value = Some(value.to_string());
            match name {
                "os" => self.settings.os = value,
                "compiler" => self.settings.compiler = value,
                "build_type" => self.settings.build_type = value,
                "arch" => self.settings.arch = value,
                other => {
                    return Err(Error::InvalidSetting(format!(
                        "unknown setting '{}' (expected os, compiler, build_type or arch)",
                        other
                    )));
                }
            }
        }

        for assignment in options {
            let (name, value) = split_assignment(assignment)?;
            let option = OptionName::parse(name)?;
            let value = parse_bool(value).ok_or_else(|| {
                Error::InvalidOption(format!(
                    "'{}' is not a boolean value for option {}",
                    value, option
                ))
            })?;
            self.options.insert(option.to_string(), value);
        }
        Ok(self)
    }

    /// Settings from this profile, detecting only the axes it leaves unset
    ///
    /// A profile naming both `os` and `arch` never consults the host.
    pub fn settings(&self) -> Result<Settings> {
        let os = match &self.settings.os {
            Some(os) => parse_setting("os", os)?,
            None => detect_os()?,
        };
        let arch = match &self.settings.arch {
            Some(arch) => parse_setting("arch", arch)?,
            None => detect_arch()?,
        };
        self.settings_over(Settings::new(os, arch))
    }

    /// Settings from this profile layered over `base`
    ///
    /// Setting `os` without `compiler` selects that OS's default compiler.
    pub fn settings_over(&self, base: Settings) -> Result<Settings> {
        let mut settings = base;
        if let Some(os) = &self.settings.os {
            settings.os = parse_setting("os", os)?;
            if self.settings.compiler.is_none() {
                settings.compiler = Compiler::default_for(settings.os);
            }
        }
        if let Some(compiler) = &self.settings.compiler {
            settings.compiler = parse_setting("compiler", compiler)?;
        }
        if let Some(build_type) = &self.settings.build_type {
            settings.build_type = parse_setting("build_type", build_type)?;
        }
        if let Some(arch) = &self.settings.arch {
            settings.arch = parse_setting("arch", arch)?;
        }
        Ok(settings)
    }

    /// Option values from this profile
    pub fn raw_options(&self) -> Result<RawOptions> {
        RawOptions::from_map(&self.options)
    }
}

/// Split a `name=value` assignment
pub fn split_assignment(assignment: &str) -> Result<(&str, &str)> {
    assignment
        .split_once('=')
        .map(|(n, v)| (n.trim(), v.trim()))
        .ok_or_else(|| Error::ParseError(format!("expected name=value, got '{}'", assignment)))
}
