// src/recipe/toolchain.rs

//! CMake toolchain generation
//!
//! Maps the resolved configuration onto cache variables in a toolchain file
//! and writes one binding per requirement so CMake finds the pinned version
//! without resolving it again.

use super::layout::LayoutPlan;
use super::options::OptionName;
use super::requirements::DependencySpec;
use super::resolve::Configuration;
use crate::error::Result;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the generated toolchain
pub const TOOLCHAIN_FILE: &str = "clwe_toolchain.cmake";

/// Feature options and the build variables they drive, one to one
pub const FEATURE_VARIABLES: &[(OptionName, &str)] = &[
    (OptionName::WithPython, "BUILD_PYTHON_BINDINGS"),
    (OptionName::WithTests, "ENABLE_TESTS"),
    (OptionName::WithBenchmarks, "ENABLE_BENCHMARKS"),
];

fn on_off(value: bool) -> &'static str {
    if value { "ON" } else { "OFF" }
}

/// Generated find-package files for one requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyBinding {
    pub name: String,
    pub version: String,
    /// Target consumers and the build link against
    pub target: String,
    /// Install prefix hint passed to the find module, if known
    pub root: Option<PathBuf>,
    find_module: String,
    module_targets: Vec<String>,
}

impl DependencyBinding {
    /// Bind a requirement, with an optional install prefix
    pub fn new(dep: &DependencySpec, root: Option<PathBuf>) -> Self {
        Self {
            name: dep.name.to_string(),
            version: dep.version.to_string(),
            target: dep.target(),
            root,
            find_module: dep.find_module.to_string(),
            module_targets: dep.module_targets.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn config_file_name(&self) -> String {
        format!("{}-config.cmake", self.name)
    }

    pub fn version_file_name(&self) -> String {
        format!("{}-config-version.cmake", self.name)
    }

    /// Contents of `<name>-config.cmake`
    pub fn render_config(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {} {} binding, generated by clwe-recipe", self.name, self.version);
        let _ = writeln!(out, "set({}_VERSION \"{}\")", self.name, self.version);
        if let Some(root) = &self.root {
            let _ = writeln!(
                out,
                "set({}_ROOT_DIR \"{}\")",
                self.find_module.to_uppercase(),
                cmake_path(root)
            );
        }
        let _ = writeln!(
            out,
            "find_package({} {} EXACT REQUIRED MODULE)",
            self.find_module, self.version
        );
        let _ = writeln!(out, "if(NOT TARGET {})", self.target);
        let _ = writeln!(out, "    add_library({} INTERFACE IMPORTED)", self.target);
        let _ = writeln!(
            out,
            "    set_property(TARGET {} PROPERTY INTERFACE_LINK_LIBRARIES {})",
            self.target,
            self.module_targets.join(" ")
        );
        let _ = writeln!(out, "endif()");
        out
    }

    /// Contents of `<name>-config-version.cmake`; only the pinned version is compatible
    pub fn render_version(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "set(PACKAGE_VERSION \"{}\")", self.version);
        let _ = writeln!(out, "if(NOT PACKAGE_FIND_VERSION OR PACKAGE_FIND_VERSION VERSION_EQUAL PACKAGE_VERSION)");
        let _ = writeln!(out, "    set(PACKAGE_VERSION_COMPATIBLE TRUE)");
        let _ = writeln!(out, "    set(PACKAGE_VERSION_EXACT TRUE)");
        let _ = writeln!(out, "else()");
        let _ = writeln!(out, "    set(PACKAGE_VERSION_COMPATIBLE FALSE)");
        let _ = writeln!(out, "endif()");
        out
    }
}

/// A generated toolchain for one configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    /// Feature variables, one per feature option
    pub variables: BTreeMap<String, bool>,
    /// `BUILD_SHARED_LIBS`
    pub shared_libs: bool,
    /// `CMAKE_POSITION_INDEPENDENT_CODE`, only when `fPIC` survived resolution
    pub position_independent_code: Option<bool>,
    /// `CMAKE_BUILD_TYPE`, only for single-configuration layouts
    pub build_type: Option<String>,
    /// Folder the toolchain and bindings are written to
    pub generators_folder: PathBuf,
    pub bindings: Vec<DependencyBinding>,
}

impl Toolchain {
    /// Derive the toolchain from a resolved configuration
    ///
    /// `roots` maps requirement names to install prefixes.
    pub fn from_configuration(
        configuration: &Configuration,
        layout: &LayoutPlan,
        requirements: &[DependencySpec],
        roots: &HashMap<String, PathBuf>,
    ) -> Self {
        let configuration = &configuration.normalized();
        let variables = FEATURE_VARIABLES
            .iter()
            .map(|(option, variable)| {
                let value = configuration.option(*option).unwrap_or(false);
                (variable.to_string(), value)
            })
            .collect();

        let bindings = requirements
            .iter()
            .map(|dep| DependencyBinding::new(dep, roots.get(dep.name).cloned()))
            .collect();

        Self {
            variables,
            shared_libs: configuration.shared,
            position_independent_code: configuration.fpic,
            build_type: if layout.multi_config {
                None
            } else {
                Some(configuration.settings.build_type.to_string())
            },
            generators_folder: layout.generators_folder.clone(),
            bindings,
        }
    }

    /// Path of the toolchain file
    pub fn toolchain_path(&self) -> PathBuf {
        self.generators_folder.join(TOOLCHAIN_FILE)
    }

    /// Contents of the toolchain file
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# Generated by clwe-recipe, do not edit");
        let _ = writeln!(out, "include_guard()");
        out.push('\n');

        if let Some(build_type) = &self.build_type {
            let _ = writeln!(
                out,
                "set(CMAKE_BUILD_TYPE \"{}\" CACHE STRING \"Build type\" FORCE)",
                build_type
            );
        }
        let _ = writeln!(
            out,
            "set(BUILD_SHARED_LIBS {} CACHE BOOL \"Build shared libraries\")",
            on_off(self.shared_libs)
        );
        if let Some(pic) = self.position_independent_code {
            let _ = writeln!(
                out,
                "set(CMAKE_POSITION_INDEPENDENT_CODE {} CACHE BOOL \"Position independent code\")",
                on_off(pic)
            );
        }
        out.push('\n');

        for (name, value) in &self.variables {
            let _ = writeln!(
                out,
                "set({0} {1} CACHE BOOL \"Variable {0} defined by clwe-recipe\")",
                name,
                on_off(*value)
            );
        }
        out.push('\n');

        let generators = cmake_path(&self.generators_folder);
        let _ = writeln!(out, "list(PREPEND CMAKE_PREFIX_PATH \"{}\")", generators);
        let _ = writeln!(out, "set(CMAKE_FIND_PACKAGE_PREFER_CONFIG ON)");
        for binding in &self.bindings {
            let _ = writeln!(out, "set({}_DIR \"{}\")", binding.name, generators);
        }
        out
    }

    /// Write the toolchain and all bindings into the generators folder
    pub fn write(&self) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.generators_folder)?;

        let mut written = Vec::new();
        let toolchain = self.toolchain_path();
        fs::write(&toolchain, self.render())?;
        written.push(toolchain);

        for binding in &self.bindings {
            let config = self.generators_folder.join(binding.config_file_name());
            fs::write(&config, binding.render_config())?;
            let version = self.generators_folder.join(binding.version_file_name());
            fs::write(&version, binding.render_version())?;
            debug!("Wrote binding for {}/{}", binding.name, binding.version);
            written.push(config);
            written.push(version);
        }

        info!(
            "Generated toolchain in {}",
            self.generators_folder.display()
        );
        Ok(written)
    }

    /// Versions bound for each requirement, by name
    pub fn bound_versions(&self) -> BTreeMap<String, String> {
        self.bindings
            .iter()
            .map(|b| (b.name.clone(), b.version.clone()))
            .collect()
    }
}

/// CMake wants forward slashes even on Windows
fn cmake_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::options::{OptionSchema, RawOptions};
    use crate::recipe::requirements::{OPENSSL, requirements};
    use crate::recipe::resolve::resolve;
    use crate::recipe::settings::{Arch, Os, Settings};
    use tempfile::TempDir;

    fn toolchain_for(settings: Settings, raw: RawOptions) -> Toolchain {
        let config = resolve(&OptionSchema::recipe(), &settings, &raw);
        let layout = LayoutPlan::new(Path::new("/work"), &config);
        Toolchain::from_configuration(&config, &layout, requirements(), &HashMap::new())
    }

    #[test]
    fn test_feature_variables_map_one_to_one() {
        let tc = toolchain_for(
            Settings::new(Os::Linux, Arch::X86_64),
            RawOptions::new()
                .with(OptionName::WithPython, true)
                .with(OptionName::WithBenchmarks, true),
        );

        assert_eq!(tc.variables.len(), 3);
        assert!(tc.variables["BUILD_PYTHON_BINDINGS"]);
        assert!(!tc.variables["ENABLE_TESTS"]);
        assert!(tc.variables["ENABLE_BENCHMARKS"]);
    }

    #[test]
    fn test_render_contains_variables() {
        let tc = toolchain_for(
            Settings::new(Os::Linux, Arch::X86_64),
            RawOptions::new().with(OptionName::WithTests, true),
        );
        let text = tc.render();

        assert!(text.contains("set(ENABLE_TESTS ON CACHE BOOL"));
        assert!(text.contains("set(BUILD_PYTHON_BINDINGS OFF CACHE BOOL"));
        assert!(text.contains("set(ENABLE_BENCHMARKS OFF CACHE BOOL"));
        assert!(text.contains("set(BUILD_SHARED_LIBS OFF"));
        assert!(text.contains("set(CMAKE_POSITION_INDEPENDENT_CODE ON"));
        assert!(text.contains("set(CMAKE_BUILD_TYPE \"Release\""));
        assert!(text.contains("set(openssl_DIR \"/work/"));
    }

    #[test]
    fn test_no_pic_variable_without_fpic() {
        let tc = toolchain_for(
            Settings::new(Os::Linux, Arch::X86_64),
            RawOptions::new().with(OptionName::Shared, true),
        );
        assert_eq!(tc.position_independent_code, None);
        assert!(!tc.render().contains("CMAKE_POSITION_INDEPENDENT_CODE"));
        assert!(tc.render().contains("set(BUILD_SHARED_LIBS ON"));
    }

    #[test]
    fn test_hand_built_configuration_is_corrected() {
        let config = Configuration {
            settings: Settings::new(Os::Windows, Arch::X86_64),
            shared: true,
            fpic: Some(true),
            with_python: false,
            with_tests: false,
            with_benchmarks: false,
        };
        let layout = LayoutPlan::new(Path::new("/work"), &config);
        let tc = Toolchain::from_configuration(&config, &layout, requirements(), &HashMap::new());

        assert_eq!(tc.position_independent_code, None);
        assert!(!tc.render().contains("CMAKE_POSITION_INDEPENDENT_CODE"));
    }

    #[test]
    fn test_multi_config_omits_build_type() {
        let tc = toolchain_for(Settings::new(Os::Windows, Arch::X86_64), RawOptions::new());
        assert_eq!(tc.build_type, None);
        assert!(!tc.render().contains("CMAKE_BUILD_TYPE"));
    }

    #[test]
    fn test_binding_pins_version() {
        let binding = DependencyBinding::new(&OPENSSL, Some(PathBuf::from("/opt/openssl")));
        let config = binding.render_config();

        assert_eq!(binding.config_file_name(), "openssl-config.cmake");
        assert!(config.contains("find_package(OpenSSL 3.1.0 EXACT REQUIRED MODULE)"));
        assert!(config.contains("set(OPENSSL_ROOT_DIR \"/opt/openssl\")"));
        assert!(config.contains("add_library(openssl::openssl INTERFACE IMPORTED)"));
        assert!(config.contains("OpenSSL::SSL OpenSSL::Crypto"));
        assert!(binding.render_version().contains("set(PACKAGE_VERSION \"3.1.0\")"));
    }

    #[test]
    fn test_write_creates_files() {
        let work = TempDir::new().unwrap();
        let settings = Settings::new(Os::Linux, Arch::X86_64);
        let config = resolve(&OptionSchema::recipe(), &settings, &RawOptions::new());
        let layout = LayoutPlan::new(work.path(), &config);
        let tc = Toolchain::from_configuration(&config, &layout, requirements(), &HashMap::new());

        let written = tc.write().unwrap();
        assert_eq!(written.len(), 3);
        assert!(layout.generators_folder.join(TOOLCHAIN_FILE).is_file());
        assert!(layout.generators_folder.join("openssl-config.cmake").is_file());
        assert!(layout.generators_folder.join("openssl-config-version.cmake").is_file());

        // Rewriting is harmless
        assert_eq!(tc.write().unwrap(), written);
        assert_eq!(tc.bound_versions()["openssl"], "3.1.0");
    }
}
