//! View-state persistence
//!
//! The settings file remembers which tree nodes were expanded and which
//! installation was selected. Located at ~/.expertmgr/settings.yaml by default:
//!
//! ```yaml
//! last_updated: "2026-01-21T10:00:00Z"
//! expanded_nodes:
//!   Embarcadero: true
//!   Embarcadero/BDS: false
//! selected_node: Embarcadero/BDS/22.0
//! ```

use crate::view_state::{PersistedViewState, ViewStateTracker};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use expertmgr_core::get_home_dir;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Contents of the settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub view: PersistedViewState,
}

/// Loads and saves the view settings file
pub struct SettingsManager {
    settings_path: Utf8PathBuf,
    settings: ViewSettings,
}

impl SettingsManager {
    /// Open the settings file, starting empty when it does not exist yet
    pub fn new(settings_path: Utf8PathBuf) -> Result<Self> {
        debug!("Loading settings from: {}", settings_path);

        let settings = if settings_path.exists() {
            Self::load_settings(&settings_path)?
        } else {
            info!("No settings at {}, starting fresh", settings_path);
            ViewSettings::default()
        };

        Ok(Self {
            settings_path,
            settings,
        })
    }

    /// Open the settings from the default location (~/.expertmgr/settings.yaml)
    pub fn load_default() -> Result<Self> {
        Self::new(Self::default_settings_path()?)
    }

    pub fn default_settings_path() -> Result<Utf8PathBuf> {
        let home = get_home_dir()?;
        Utf8PathBuf::from_path_buf(home.join(".expertmgr").join("settings.yaml"))
            .map_err(|p| anyhow::anyhow!("Non UTF-8 settings path: {:?}", p))
    }

    pub fn path(&self) -> &Utf8Path {
        &self.settings_path
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    /// View-state tracker seeded from the loaded settings
    pub fn tracker(&self) -> ViewStateTracker {
        ViewStateTracker::from_persisted(self.settings.view.clone())
    }

    /// Store the tracker's state and write the file
    pub fn save_tracker(&mut self, tracker: &ViewStateTracker) -> Result<()> {
        self.settings.view = tracker.to_persisted();
        self.save()
    }

    pub fn save(&mut self) -> Result<()> {
        self.settings.last_updated = Some(Utc::now());
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent))?;
        }
        let content = serde_yaml_ng::to_string(&self.settings)?;
        std::fs::write(&self.settings_path, content)
            .with_context(|| format!("Failed to write {}", self.settings_path))?;
        debug!(
            "Saved settings with {} node states",
            self.settings.view.expanded_nodes.len()
        );
        Ok(())
    }

    fn load_settings(path: &Utf8Path) -> Result<ViewSettings> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path))?;
        let settings: ViewSettings = serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path))?;
        debug!(
            "Loaded settings with {} node states",
            settings.view.expanded_nodes.len()
        );
        Ok(settings)
    }
}
