// src/recipe/kitchen/mod.rs

//! Kitchen: drives a resolved configuration through export, build and packaging
//!
//! The Kitchen owns the build tool and the work directory. Each stage takes
//! the frozen [`Configuration`] and the previous stage's output; there are no
//! retries and the first failure ends the cook.

mod config;
mod cook;
mod tool;

pub use config::{CookResult, KitchenConfig};
pub use cook::Cook;
pub use tool::{BuildTool, CmakeTool, ToolOutput};

use crate::error::Result;
use crate::recipe::layout::{LayoutPlan, check_inputs, export_sources};
use crate::recipe::options::{OptionSchema, RawOptions};
use crate::recipe::package_info::PackageInfo;
use crate::recipe::requirements::requirements;
use crate::recipe::resolve::{Configuration, resolve_checked};
use crate::recipe::settings::Settings;
use crate::recipe::toolchain::Toolchain;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// The Kitchen: where configurations are cooked
pub struct Kitchen {
    pub(crate) config: KitchenConfig,
    schema: OptionSchema,
    tool: Arc<dyn BuildTool>,
}

impl Kitchen {
    /// Create a Kitchen with the given configuration and build tool
    pub fn new(config: KitchenConfig, tool: Arc<dyn BuildTool>) -> Self {
        Self {
            config,
            schema: OptionSchema::recipe(),
            tool,
        }
    }

    /// Create a Kitchen that runs cmake
    pub fn with_cmake(config: KitchenConfig) -> Result<Self> {
        let tool = CmakeTool::locate(config.cmake.as_deref())?;
        Ok(Self::new(config, Arc::new(tool)))
    }

    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    /// Resolve raw options for the given settings
    pub fn resolve(&self, settings: &Settings, raw: &RawOptions) -> Result<Configuration> {
        let configuration = resolve_checked(&self.schema, settings, raw)?;
        info!(
            "Resolved configuration {} ({} {} {} {})",
            configuration.short_id(),
            settings.os,
            settings.arch,
            settings.compiler,
            settings.build_type
        );
        Ok(configuration)
    }

    /// Folder layout for a configuration under the work directory
    pub fn plan(&self, configuration: &Configuration) -> LayoutPlan {
        LayoutPlan::new(&self.config.work_dir, configuration)
    }

    /// Export sources into the work directory
    pub fn export(&self, source_root: &Path, configuration: &Configuration) -> Result<LayoutPlan> {
        let layout = self.plan(configuration);
        export_sources(source_root, &layout.export_folder)?;
        Ok(layout)
    }

    /// Generate and write the toolchain for a planned layout
    pub fn generate(&self, configuration: &Configuration, layout: &LayoutPlan) -> Result<Toolchain> {
        let toolchain = Toolchain::from_configuration(
            configuration,
            layout,
            requirements(),
            &self.config.dependency_roots,
        );
        toolchain.write()?;
        Ok(toolchain)
    }

    /// Cook a configuration: the full pipeline
    ///
    /// 1. **Preflight**: every required input exists at `source_root`
    /// 2. **Export**: copy sources into the export folder
    /// 3. **Generate**: write the toolchain and dependency bindings
    /// 4. **Build**: configure, then build
    /// 5. **Package**: install, then stage the license
    /// 6. **Publish**: write consumer metadata into the package
    pub fn cook(&self, source_root: &Path, configuration: &Configuration) -> Result<CookResult> {
        let configuration = &configuration.normalized();
        info!(
            "Cooking {} with configuration {}",
            crate::recipe::metadata::RECIPE.reference(),
            configuration.short_id()
        );

        check_inputs(source_root)?;

        info!("Exporting sources...");
        let layout = self.export(source_root, configuration)?;

        info!("Generating toolchain...");
        let toolchain = self.generate(configuration, &layout)?;

        let mut cook = Cook::new(self, configuration, &layout);

        info!("Building...");
        cook.build(&toolchain.toolchain_path())?;

        info!("Packaging...");
        cook.package(source_root)?;

        let package_info = PackageInfo::for_configuration(configuration);
        let package_info_path = package_info.write(&layout.package_folder)?;
        let log = cook.into_log();

        info!("Cooked: {}", layout.package_folder.display());

        Ok(CookResult {
            configuration: configuration.clone(),
            layout,
            package_info,
            package_info_path,
            log,
        })
    }
}
