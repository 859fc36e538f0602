//! CLI command implementations

pub mod entry;
pub mod list;
pub mod macros;
pub mod tree;
pub mod validate;
pub mod version;
pub mod view;

use anyhow::{anyhow, bail, Context, Result};
use camino::Utf8Path;
use expertmgr_core::store::{OsFileProbe, YamlStore};
use expertmgr_core::types::{InstallationPath, InstallationTree};
use expertmgr_core::{HierarchicalConfigLoader, ManagerConfig};
use expertmgr_experts::{ExpertManager, SettingsManager};
use std::sync::Arc;
use tracing::debug;

/// Store, tree and view settings for one command invocation
pub struct Session {
    pub config: ManagerConfig,
    pub manager: ExpertManager<YamlStore, OsFileProbe>,
    pub settings: SettingsManager,
    pub tree: Arc<InstallationTree>,
}

impl Session {
    /// Load configuration, open the store and scan it
    pub fn open(store_override: Option<&Utf8Path>) -> Result<Self> {
        let mut config = HierarchicalConfigLoader::new()
            .and_then(|loader| loader.load())
            .context("Failed to load configuration")?;
        if let Some(store) = store_override {
            config.store_path = store.to_path_buf();
        }
        debug!("Using store {}", config.store_path);

        let settings = SettingsManager::new(config.settings_path.clone())
            .context("Failed to load view settings")?;
        let mut manager = ExpertManager::open(&config, OsFileProbe)
            .with_context(|| format!("Failed to open store {}", config.store_path))?
            .with_view_state(settings.tracker());
        let tree = manager.rescan();

        Ok(Self {
            config,
            manager,
            settings,
            tree,
        })
    }

    /// Installation named on the command line, or the selected node
    pub fn installation(&self, path: Option<&str>) -> Result<InstallationPath> {
        let path = match path {
            Some(path) => path.to_string(),
            None => self
                .manager
                .view_state()
                .selection()
                .map(str::to_string)
                .ok_or_else(|| anyhow!("No installation given and none selected"))?,
        };
        let installation = InstallationPath::parse(&path)?;
        if self.tree.find(&path).is_none() {
            bail!("Installation {} not found under {}", path, self.config.root);
        }
        Ok(installation)
    }

    /// Write the view state back to the settings file
    pub fn save_view_state(&mut self) -> Result<()> {
        self.settings
            .save_tracker(self.manager.view_state())
            .context("Failed to save view settings")
    }
}
