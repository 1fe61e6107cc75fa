// src/recipe/resolve.rs

//! Option resolution
//!
//! Turns raw option input plus platform settings into a [`Configuration`].
//! Two rules remove `fPIC`, in order:
//!
//! 1. `os == Windows`: position-independent code is not a choice there.
//! 2. `shared == true`: shared libraries are always position independent.
//!
//! Removing an already-absent option is a no-op, so resolution is idempotent.
//! An explicit `fPIC` on Windows is dropped without a warning.

use super::options::{OptionName, OptionSchema, RawOptions};
use super::requirements::requirements;
use super::settings::{Os, Settings};
use crate::error::Result;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Length of the package id prefix used for folder names
const SHORT_ID_LEN: usize = 16;

/// The resolved option values for one build
///
/// Invariant: `fpic` is `Some` iff `settings.os != Windows` and `!shared`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Configuration {
    pub settings: Settings,
    pub shared: bool,
    #[serde(rename = "fPIC", skip_serializing_if = "Option::is_none")]
    pub fpic: Option<bool>,
    pub with_python: bool,
    pub with_tests: bool,
    pub with_benchmarks: bool,
}

/// Resolve raw options against the schema for the given settings
///
/// Total: options the caller leaves unset take their schema default, and an
/// option missing from the schema resolves to `false`.
pub fn resolve(schema: &OptionSchema, settings: &Settings, raw: &RawOptions) -> Configuration {
    let value = |name| schema.value_of(name, raw).unwrap_or(false);

    let shared = value(OptionName::Shared);
    let mut fpic = schema.value_of(OptionName::Fpic, raw);

    if settings.os == Os::Windows && fpic.is_some() {
        debug!("Dropping fPIC: not an option on Windows");
        fpic = None;
    }

    if shared && fpic.is_some() {
        debug!("Dropping fPIC: shared builds are position independent");
        fpic = None;
    }

    Configuration {
        settings: *settings,
        shared,
        fpic,
        with_python: value(OptionName::WithPython),
        with_tests: value(OptionName::WithTests),
        with_benchmarks: value(OptionName::WithBenchmarks),
    }
}

/// Validate raw input, then resolve it
pub fn resolve_checked(
    schema: &OptionSchema,
    settings: &Settings,
    raw: &RawOptions,
) -> Result<Configuration> {
    schema.validate(raw)?;
    Ok(resolve(schema, settings, raw))
}

impl Configuration {
    /// Value of an option in this configuration, `None` if removed
    pub fn option(&self, name: OptionName) -> Option<bool> {
        match name {
            OptionName::Shared => Some(self.shared),
            OptionName::Fpic => self.fpic,
            OptionName::WithPython => Some(self.with_python),
            OptionName::WithTests => Some(self.with_tests),
            OptionName::WithBenchmarks => Some(self.with_benchmarks),
        }
    }

    /// Raw input that reproduces this configuration when resolved
    pub fn as_raw(&self) -> RawOptions {
        let mut raw = RawOptions::new()
            .with(OptionName::Shared, self.shared)
            .with(OptionName::WithPython, self.with_python)
            .with(OptionName::WithTests, self.with_tests)
            .with(OptionName::WithBenchmarks, self.with_benchmarks);
        if let Some(fpic) = self.fpic {
            raw.set(OptionName::Fpic, fpic);
        }
        raw
    }

    /// This configuration with both removal rules applied again
    ///
    /// A configuration built by hand can carry `fPIC` on Windows or next to
    /// `shared`; the pipeline works on the normalized value instead.
    pub fn normalized(&self) -> Configuration {
        resolve(&OptionSchema::recipe(), &self.settings, &self.as_raw())
    }

    /// Canonical text the package id is computed from
    pub fn canonical_text(&self) -> String {
        let config = self.normalized();
        let mut text = String::from("[settings]\n");
        for line in self.settings.canonical_lines() {
            text.push_str(&line);
            text.push('\n');
        }

        text.push_str("[options]\n");
        let mut names: Vec<OptionName> = [
            OptionName::Shared,
            OptionName::Fpic,
            OptionName::WithPython,
            OptionName::WithTests,
            OptionName::WithBenchmarks,
        ]
        .into_iter()
        .filter(|n| config.option(*n).is_some())
        .collect();
        names.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));
        for name in names {
            if let Some(value) = config.option(name) {
                text.push_str(&format!("{}={}\n", name, if value { "True" } else { "False" }));
            }
        }

        text.push_str("[requires]\n");
        for dep in requirements() {
            text.push_str(&dep.minor_mode_reference());
            text.push('\n');
        }
        text
    }

    /// Deterministic identifier of the binary this configuration produces
    pub fn package_id(&self) -> String {
        hex::encode(Sha256::digest(self.canonical_text().as_bytes()))
    }

    /// Prefix of the package id used for folder names
    pub fn short_id(&self) -> String {
        let mut id = self.package_id();
        id.truncate(SHORT_ID_LEN);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::settings::Arch;

    fn linux() -> Settings {
        Settings::new(Os::Linux, Arch::X86_64)
    }

    fn windows() -> Settings {
        Settings::new(Os::Windows, Arch::X86_64)
    }

    #[test]
    fn test_linux_static_keeps_fpic() {
        let raw = RawOptions::new()
            .with(OptionName::Shared, false)
            .with(OptionName::Fpic, true);
        let config = resolve(&OptionSchema::recipe(), &linux(), &raw);
        assert_eq!(config.fpic, Some(true));
    }

    #[test]
    fn test_linux_static_keeps_explicit_false() {
        let raw = RawOptions::new().with(OptionName::Fpic, false);
        let config = resolve(&OptionSchema::recipe(), &linux(), &raw);
        assert_eq!(config.fpic, Some(false));
    }

    #[test]
    fn test_fpic_defaults_to_true() {
        let config = resolve(&OptionSchema::recipe(), &linux(), &RawOptions::new());
        assert_eq!(config.fpic, Some(true));
        assert!(!config.shared);
    }

    #[test]
    fn test_windows_drops_fpic() {
        for fpic in [true, false] {
            let raw = RawOptions::new()
                .with(OptionName::Shared, false)
                .with(OptionName::Fpic, fpic);
            let config = resolve(&OptionSchema::recipe(), &windows(), &raw);
            assert_eq!(config.fpic, None);
            assert_eq!(config.option(OptionName::Fpic), None);
        }
    }

    #[test]
    fn test_shared_drops_fpic() {
        let raw = RawOptions::new()
            .with(OptionName::Shared, true)
            .with(OptionName::Fpic, true);
        let config = resolve(&OptionSchema::recipe(), &linux(), &raw);
        assert!(config.shared);
        assert_eq!(config.fpic, None);
    }

    #[test]
    fn test_windows_shared_drops_fpic() {
        let raw = RawOptions::new().with(OptionName::Shared, true);
        let config = resolve(&OptionSchema::recipe(), &windows(), &raw);
        assert_eq!(config.fpic, None);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let schema = OptionSchema::recipe();
        for settings in [linux(), windows(), Settings::new(Os::Macos, Arch::Armv8)] {
            for shared in [true, false] {
                for fpic in [None, Some(true), Some(false)] {
                    let mut raw = RawOptions::new().with(OptionName::Shared, shared);
                    if let Some(v) = fpic {
                        raw.set(OptionName::Fpic, v);
                    }
                    let once = resolve(&schema, &settings, &raw);
                    let twice = resolve(&schema, &settings, &once.as_raw());
                    assert_eq!(once, twice);
                }
            }
        }
    }

    #[test]
    fn test_feature_options_pass_through() {
        let raw = RawOptions::new()
            .with(OptionName::WithPython, true)
            .with(OptionName::WithBenchmarks, true);
        let config = resolve(&OptionSchema::recipe(), &linux(), &raw);
        assert!(config.with_python);
        assert!(!config.with_tests);
        assert!(config.with_benchmarks);
    }

    #[test]
    fn test_resolve_checked_rejects_out_of_domain() {
        use crate::recipe::options::OptionDecl;

        let schema = OptionSchema::new(vec![OptionDecl {
            name: OptionName::Shared,
            values: vec![false],
            default: false,
        }]);
        let raw = RawOptions::new().with(OptionName::Shared, true);
        assert!(resolve_checked(&schema, &linux(), &raw).is_err());
    }

    #[test]
    fn test_serialized_configuration_omits_fpic() {
        let raw = RawOptions::new().with(OptionName::Shared, true);
        let config = resolve(&OptionSchema::recipe(), &linux(), &raw);
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("fPIC").is_none());
        assert_eq!(json["settings"]["os"], "Linux");

        let config = resolve(&OptionSchema::recipe(), &linux(), &RawOptions::new());
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["fPIC"], true);
    }

    #[test]
    fn test_package_id_is_deterministic() {
        let schema = OptionSchema::recipe();
        let a = resolve(&schema, &linux(), &RawOptions::new());
        let b = resolve(&schema, &linux(), &RawOptions::new());
        assert_eq!(a.package_id(), b.package_id());
        assert_eq!(a.package_id().len(), 64);
        assert_eq!(a.short_id().len(), 16);

        let shared = resolve(&schema, &linux(), &RawOptions::new().with(OptionName::Shared, true));
        assert_ne!(a.package_id(), shared.package_id());
    }

    #[test]
    fn test_normalized_corrects_hand_built_configuration() {
        let bypassed = Configuration {
            settings: windows(),
            shared: true,
            fpic: Some(true),
            with_python: false,
            with_tests: true,
            with_benchmarks: false,
        };
        let fixed = bypassed.normalized();
        assert_eq!(fixed.fpic, None);
        assert!(fixed.shared);
        assert!(fixed.with_tests);

        let resolved = resolve(
            &OptionSchema::recipe(),
            &windows(),
            &RawOptions::new()
                .with(OptionName::Shared, true)
                .with(OptionName::WithTests, true),
        );
        assert_eq!(fixed, resolved);
        assert_eq!(bypassed.package_id(), resolved.package_id());
    }

    #[test]
    fn test_canonical_text_layout() {
        let config = resolve(&OptionSchema::recipe(), &linux(), &RawOptions::new());
        let text = config.canonical_text();
        assert!(text.starts_with("[settings]\narch=x86_64\n"));
        assert!(text.contains("[options]\nfPIC=True\nshared=False\n"));
        assert!(text.ends_with("[requires]\nopenssl/3.1.Z\n"));
    }
}
