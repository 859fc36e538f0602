//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. Global config (~/.expertmgr/config.yaml)
//! 3. Environment variables (EXPERTMGR_* prefix)
//! 4. CLI flags (handled by caller)

use crate::error::{Error, Result};
use crate::utils::get_home_dir;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use tracing::debug;

const EMBEDDED_DEFAULTS: &str = include_str!("defaults.yaml");

/// Resolved manager configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Store section that holds the vendor roots
    pub root: String,

    /// Vendor roots searched for installations, in display order
    pub vendors: Vec<String>,

    /// Store document location
    pub store_path: Utf8PathBuf,

    /// View-state settings location
    pub settings_path: Utf8PathBuf,
}

/// Partial configuration as written in a file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ConfigOverlay {
    #[serde(default)]
    root: Option<String>,

    #[serde(default)]
    vendors: Option<Vec<String>>,

    #[serde(default)]
    store_path: Option<Utf8PathBuf>,

    #[serde(default)]
    settings_path: Option<Utf8PathBuf>,
}

/// Configuration hierarchy loader
pub struct HierarchicalConfigLoader {
    /// Base directory for configuration files
    config_dir: Utf8PathBuf,
}

impl HierarchicalConfigLoader {
    /// Create a new hierarchical config loader
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self { config_dir })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    /// Get the standard config directory (~/.expertmgr)
    fn get_config_dir() -> Result<Utf8PathBuf> {
        let home = get_home_dir().map_err(|e| Error::invalid_config(e.to_string()))?;
        Utf8PathBuf::from_path_buf(home.join(".expertmgr"))
            .map_err(|p| Error::invalid_config(format!("Non UTF-8 home directory: {:?}", p)))
    }

    /// Load configuration with hierarchical precedence
    pub fn load(&self) -> Result<ManagerConfig> {
        let mut overlay = Self::load_embedded_defaults()?;

        let config_path = self.config_dir.join("config.yaml");
        if config_path.exists() {
            debug!("Loading config overlay from: {}", config_path);
            let file_overlay = Self::load_yaml_file(&config_path)?;
            overlay = Self::merge(overlay, file_overlay);
        }

        overlay = Self::apply_env_overrides(overlay)?;
        self.resolve(overlay)
    }

    fn load_embedded_defaults() -> Result<ConfigOverlay> {
        serde_yaml_ng::from_str(EMBEDDED_DEFAULTS).map_err(|e| {
            Error::invalid_config(format!("Failed to parse embedded defaults: {}", e))
        })
    }

    /// Load a YAML file and parse it
    fn load_yaml_file(path: &Utf8Path) -> Result<ConfigOverlay> {
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(ConfigOverlay::default());
        }
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    /// Merge two overlays (base is overridden by overlay)
    fn merge(base: ConfigOverlay, overlay: ConfigOverlay) -> ConfigOverlay {
        ConfigOverlay {
            root: overlay.root.or(base.root),
            vendors: overlay.vendors.or(base.vendors),
            store_path: overlay.store_path.or(base.store_path),
            settings_path: overlay.settings_path.or(base.settings_path),
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut overlay: ConfigOverlay) -> Result<ConfigOverlay> {
        if let Ok(val) = env::var("EXPERTMGR_ROOT") {
            overlay.root = Some(val);
        }

        if let Ok(val) = env::var("EXPERTMGR_VENDORS") {
            let vendors: Vec<String> = val
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
                .collect();
            if vendors.is_empty() {
                return Err(Error::invalid_config(
                    "EXPERTMGR_VENDORS must list at least one vendor",
                ));
            }
            overlay.vendors = Some(vendors);
        }

        if let Ok(val) = env::var("EXPERTMGR_STORE") {
            overlay.store_path = Some(Utf8PathBuf::from(val));
        }

        if let Ok(val) = env::var("EXPERTMGR_SETTINGS") {
            overlay.settings_path = Some(Utf8PathBuf::from(val));
        }

        Ok(overlay)
    }

    /// Fill in file locations and check the result
    fn resolve(&self, overlay: ConfigOverlay) -> Result<ManagerConfig> {
        let root = overlay
            .root
            .map(|r| r.trim_matches('/').to_string())
            .unwrap_or_default();
        let vendors = overlay.vendors.unwrap_or_default();
        if vendors.is_empty() {
            return Err(Error::invalid_config("At least one vendor must be configured"));
        }
        if let Some(bad) = vendors.iter().find(|v| v.contains('/')) {
            return Err(Error::invalid_config(format!(
                "Vendor name must not contain '/': {}",
                bad
            )));
        }

        Ok(ManagerConfig {
            root,
            vendors,
            store_path: overlay
                .store_path
                .unwrap_or_else(|| self.config_dir.join("registry.yaml")),
            settings_path: overlay
                .settings_path
                .unwrap_or_else(|| self.config_dir.join("settings.yaml")),
        })
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}
