// src/recipe/settings.rs

//! Ambient build settings: operating system, compiler, build type, architecture
//!
//! Settings are not options: they describe the platform a build targets and
//! are supplied by the caller (profile, command line, or host detection).

use crate::error::{Error, Result};
use serde::Serialize;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

/// Target operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Os {
    Linux,
    Windows,
    Macos,
    FreeBSD,
}

impl Os {
    /// Operating system of the running host, if it is one we build for
    pub fn host() -> Option<Self> {
        match std::env::consts::OS {
            "linux" => Some(Self::Linux),
            "windows" => Some(Self::Windows),
            "macos" => Some(Self::Macos),
            "freebsd" => Some(Self::FreeBSD),
            _ => None,
        }
    }
}

/// Compiler family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Compiler {
    #[serde(rename = "gcc")]
    #[strum(serialize = "gcc")]
    Gcc,
    #[serde(rename = "clang")]
    #[strum(serialize = "clang")]
    Clang,
    #[serde(rename = "apple-clang")]
    #[strum(serialize = "apple-clang")]
    AppleClang,
    #[serde(rename = "msvc")]
    #[strum(serialize = "msvc")]
    Msvc,
}

impl Compiler {
    /// Default compiler for an operating system
    pub fn default_for(os: Os) -> Self {
        match os {
            Os::Windows => Self::Msvc,
            Os::Macos => Self::AppleClang,
            Os::FreeBSD => Self::Clang,
            Os::Linux => Self::Gcc,
        }
    }

    /// Whether the compiler's usual generator builds all configurations from
    /// one tree (Visual Studio), selecting the type at build time
    pub fn is_multi_config(&self) -> bool {
        matches!(self, Self::Msvc)
    }
}

/// CMake build type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

/// Target architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Arch {
    #[serde(rename = "x86")]
    #[strum(serialize = "x86")]
    X86,
    #[serde(rename = "x86_64")]
    #[strum(to_string = "x86_64", serialize = "amd64")]
    X86_64,
    #[serde(rename = "armv7")]
    #[strum(serialize = "armv7")]
    Armv7,
    #[serde(rename = "armv8")]
    #[strum(to_string = "armv8", serialize = "aarch64", serialize = "arm64")]
    Armv8,
    #[serde(rename = "riscv64")]
    #[strum(serialize = "riscv64")]
    Riscv64,
    #[serde(rename = "ppc64le")]
    #[strum(serialize = "ppc64le")]
    Ppc64le,
}

impl Arch {
    /// Architecture of the running host, if it is one we build for
    pub fn host() -> Option<Self> {
        match std::env::consts::ARCH {
            "x86" => Some(Self::X86),
            "x86_64" => Some(Self::X86_64),
            "arm" => Some(Self::Armv7),
            "aarch64" => Some(Self::Armv8),
            "riscv64" => Some(Self::Riscv64),
            "powerpc64" if cfg!(target_endian = "little") => Some(Self::Ppc64le),
            _ => None,
        }
    }
}

/// The four settings axes declared by the recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Settings {
    pub os: Os,
    pub compiler: Compiler,
    pub build_type: BuildType,
    pub arch: Arch,
}

impl Settings {
    /// Create settings for an OS with its default compiler, release build
    pub fn new(os: Os, arch: Arch) -> Self {
        Self {
            os,
            compiler: Compiler::default_for(os),
            build_type: BuildType::default(),
            arch,
        }
    }

    /// Detect settings for the running host
    pub fn detect() -> Result<Self> {
        Ok(Self::new(detect_os()?, detect_arch()?))
    }

    /// Set the compiler
    pub fn with_compiler(mut self, compiler: Compiler) -> Self {
        self.compiler = compiler;
        self
    }

    /// Set the build type
    pub fn with_build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    /// Apply a `name=value` assignment such as `os=Windows`
    ///
    /// Changing `os` also selects that OS's default compiler; assign
    /// `compiler` afterwards to override it.
    pub fn apply(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "os" => {
                self.os = parse_setting(name, value)?;
                self.compiler = Compiler::default_for(self.os);
            }
            "compiler" => self.compiler = parse_setting(name, value)?,
            "build_type" => self.build_type = parse_setting(name, value)?,
            "arch" => self.arch = parse_setting(name, value)?,
            other => {
                return Err(Error::InvalidSetting(format!(
                    "unknown setting '{}' (expected os, compiler, build_type or arch)",
                    other
                )));
            }
        }
        Ok(())
    }

    /// Canonical `name=value` lines, sorted by name
    pub fn canonical_lines(&self) -> Vec<String> {
        vec![
            format!("arch={}", self.arch),
            format!("build_type={}", self.build_type),
            format!("compiler={}", self.compiler),
            format!("os={}", self.os),
        ]
    }
}

/// Operating system of the running host, or an error naming it
pub(crate) fn detect_os() -> Result<Os> {
    Os::host().ok_or_else(|| {
        Error::InvalidSetting(format!(
            "unsupported host operating system: {}",
            std::env::consts::OS
        ))
    })
}

/// Architecture of the running host, or an error naming it
pub(crate) fn detect_arch() -> Result<Arch> {
    Arch::host().ok_or_else(|| {
        Error::InvalidSetting(format!(
            "unsupported host architecture: {}",
            std::env::consts::ARCH
        ))
    })
}

/// Parse a single setting value, naming the setting on failure
pub fn parse_setting<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse::<T>().map_err(|_| {
        Error::InvalidSetting(format!("'{}' is not a valid value for {}", value, name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("windows".parse::<Os>().unwrap(), Os::Windows);
        assert_eq!("Linux".parse::<Os>().unwrap(), Os::Linux);
        assert_eq!("Apple-Clang".parse::<Compiler>().unwrap(), Compiler::AppleClang);
        assert_eq!("release".parse::<BuildType>().unwrap(), BuildType::Release);
        assert_eq!("aarch64".parse::<Arch>().unwrap(), Arch::Armv8);
    }

    #[test]
    fn test_display_roundtrips_canonical_names() {
        for os in Os::iter() {
            assert_eq!(os.to_string().parse::<Os>().unwrap(), os);
        }
        for arch in Arch::iter() {
            assert_eq!(arch.to_string().parse::<Arch>().unwrap(), arch);
        }
        assert_eq!(Compiler::AppleClang.to_string(), "apple-clang");
        assert_eq!(Arch::X86_64.to_string(), "x86_64");
    }

    #[test]
    fn test_default_compiler() {
        let settings = Settings::new(Os::Windows, Arch::X86_64);
        assert_eq!(settings.compiler, Compiler::Msvc);
        assert!(settings.compiler.is_multi_config());

        let settings = Settings::new(Os::Linux, Arch::X86_64);
        assert_eq!(settings.compiler, Compiler::Gcc);
        assert!(!settings.compiler.is_multi_config());
        assert_eq!(settings.build_type, BuildType::Release);
    }

    #[test]
    fn test_apply_assignment() {
        let mut settings = Settings::new(Os::Linux, Arch::X86_64);
        settings.apply("os", "Windows").unwrap();
        settings.apply("build_type", "Debug").unwrap();
        assert_eq!(settings.os, Os::Windows);
        assert_eq!(settings.build_type, BuildType::Debug);

        let err = settings.apply("os", "Plan9").unwrap_err();
        assert!(matches!(err, Error::InvalidSetting(_)));
        assert!(err.to_string().contains("os"));

        assert!(settings.apply("libc", "musl").is_err());
    }

    #[test]
    fn test_apply_os_selects_default_compiler() {
        let mut settings = Settings::new(Os::Linux, Arch::X86_64);
        settings.apply("os", "Windows").unwrap();
        assert_eq!(settings.compiler, Compiler::Msvc);

        settings.apply("compiler", "clang").unwrap();
        assert_eq!(settings.os, Os::Windows);
        assert_eq!(settings.compiler, Compiler::Clang);
    }

    #[test]
    fn test_parse_riscv_and_power() {
        assert_eq!("riscv64".parse::<Arch>().unwrap(), Arch::Riscv64);
        assert_eq!("PPC64LE".parse::<Arch>().unwrap(), Arch::Ppc64le);
        assert_eq!(Arch::Riscv64.to_string(), "riscv64");
        assert_eq!(Arch::Ppc64le.to_string(), "ppc64le");
    }

    #[test]
    fn test_canonical_lines_sorted() {
        let settings = Settings::new(Os::Linux, Arch::Armv8);
        let lines = settings.canonical_lines();
        let mut sorted = lines.clone();
        sorted.sort();
        assert_eq!(lines, sorted);
        assert!(lines.contains(&"arch=armv8".to_string()));
    }
}
