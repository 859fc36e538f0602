//! Expert and package mutations
//!
//! Every mutation writes through to the store and then re-validates the
//! owning installation. Moves between sections (enable, disable, rename) write
//! the new location before removing the old one; when the removal fails the
//! write is undone so the entry is left in exactly one place.

use crate::validator::Validator;
use expertmgr_core::error::{Error, Result};
use expertmgr_core::store::{ConfigStore, FileProbe};
use expertmgr_core::types::{
    encode_package_name, HealthStatus, InstallationPath, InstallationTree, Section,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Location of a value relative to the installation base section
#[derive(Debug, Clone, Copy)]
struct Slot<'k> {
    section: Section,
    key: &'k str,
}

/// Mutations for one installation
pub struct EntryEditor<'a, S: ConfigStore + ?Sized, P: FileProbe + ?Sized> {
    store: &'a mut S,
    probe: &'a P,
    root: &'a str,
    installation: InstallationPath,
    base: String,
    tree: Option<&'a mut Arc<InstallationTree>>,
}

impl<'a, S: ConfigStore + ?Sized, P: FileProbe + ?Sized> EntryEditor<'a, S, P> {
    pub fn new(
        store: &'a mut S,
        probe: &'a P,
        root: &'a str,
        installation: InstallationPath,
    ) -> Self {
        let base = installation.store_path(root);
        Self {
            store,
            probe,
            root,
            installation,
            base,
            tree: None,
        }
    }

    /// Editor for the installation at `logical_path`
    pub fn for_path(
        store: &'a mut S,
        probe: &'a P,
        root: &'a str,
        logical_path: &str,
    ) -> Result<Self> {
        Ok(Self::new(
            store,
            probe,
            root,
            InstallationPath::parse(logical_path)?,
        ))
    }

    /// Keep the installation's health in `tree` current after each mutation
    pub fn with_tree(mut self, tree: &'a mut Arc<InstallationTree>) -> Self {
        self.tree = Some(tree);
        self
    }

    pub fn installation(&self) -> &InstallationPath {
        &self.installation
    }

    /// Register a new, enabled expert
    pub fn add_expert(&mut self, name: &str, path: &str) -> Result<HealthStatus> {
        self.write(Section::Experts, name, path)?;
        info!("Added expert {} to {}", name, self.installation);
        Ok(self.revalidate())
    }

    /// Rename an expert and/or change its file
    pub fn edit_expert(
        &mut self,
        old_name: &str,
        enabled: bool,
        new_name: &str,
        new_path: &str,
    ) -> Result<HealthStatus> {
        let section = Section::expert_section(enabled);
        if old_name == new_name {
            self.write(section, new_name, new_path)?;
        } else {
            self.move_value(
                old_name,
                Slot {
                    section,
                    key: old_name,
                },
                Slot {
                    section,
                    key: new_name,
                },
                new_path,
            )?;
        }
        info!("Updated expert {} in {}", new_name, self.installation);
        Ok(self.revalidate())
    }

    pub fn delete_expert(&mut self, name: &str, enabled: bool) -> Result<HealthStatus> {
        let section = Section::expert_section(enabled);
        self.store.delete_value(&self.base, section.store_name(), name)?;
        info!("Removed expert {} from {}", name, self.installation);
        Ok(self.revalidate())
    }

    /// Move an expert between the active and disabled sections
    pub fn set_expert_enabled(
        &mut self,
        name: &str,
        path: &str,
        enabled: bool,
    ) -> Result<HealthStatus> {
        self.move_value(
            name,
            Slot {
                section: Section::expert_section(!enabled),
                key: name,
            },
            Slot {
                section: Section::expert_section(enabled),
                key: name,
            },
            path,
        )?;
        info!(
            "{} expert {} in {}",
            if enabled { "Enabled" } else { "Disabled" },
            name,
            self.installation
        );
        Ok(self.revalidate())
    }

    /// Register a new, enabled package
    pub fn add_package(&mut self, section: Section, path: &str, name: &str) -> Result<HealthStatus> {
        require_package(section)?;
        self.write(section, path, &encode_package_name(name, true))?;
        info!("Added package {} to {} of {}", path, section, self.installation);
        Ok(self.revalidate())
    }

    /// Change a package's file, description or enabled state
    pub fn edit_package(
        &mut self,
        section: Section,
        old_path: &str,
        new_path: &str,
        name: &str,
        enabled: bool,
    ) -> Result<HealthStatus> {
        require_package(section)?;
        let description = encode_package_name(name, enabled);
        if old_path == new_path {
            self.write(section, new_path, &description)?;
        } else {
            self.move_value(
                old_path,
                Slot {
                    section,
                    key: old_path,
                },
                Slot {
                    section,
                    key: new_path,
                },
                &description,
            )?;
        }
        info!("Updated package {} in {} of {}", new_path, section, self.installation);
        Ok(self.revalidate())
    }

    pub fn delete_package(&mut self, section: Section, path: &str) -> Result<HealthStatus> {
        require_package(section)?;
        self.store.delete_value(&self.base, section.store_name(), path)?;
        info!("Removed package {} from {} of {}", path, section, self.installation);
        Ok(self.revalidate())
    }

    /// Enable or disable a package by rewriting its description
    pub fn set_package_enabled(
        &mut self,
        section: Section,
        path: &str,
        name: &str,
        enabled: bool,
    ) -> Result<HealthStatus> {
        require_package(section)?;
        self.write(section, path, &encode_package_name(name, enabled))?;
        info!(
            "{} package {} in {}",
            if enabled { "Enabled" } else { "Disabled" },
            path,
            self.installation
        );
        Ok(self.revalidate())
    }

    /// Re-classify the installation and update the tree snapshot
    pub fn revalidate(&mut self) -> HealthStatus {
        let health = Validator::new(&*self.store, self.probe, self.root).validate(&self.installation);
        if let Some(tree) = self.tree.as_deref_mut() {
            let logical_path = self.installation.logical_path();
            if !Arc::make_mut(tree).set_health(&logical_path, health) {
                debug!("{} is not in the current tree", logical_path);
            }
        }
        health
    }

    fn write(&mut self, section: Section, key: &str, value: &str) -> Result<()> {
        self.store
            .write_string(&self.base, section.store_name(), key, value)
    }

    fn lookup(&self, slot: Slot<'_>) -> Result<Option<String>> {
        Ok(self
            .store
            .enumerate_keys(&self.base, slot.section.store_name())?
            .into_iter()
            .find_map(|(k, v)| (k == slot.key).then_some(v)))
    }

    /// Write `value` at `to`, then remove `from`. On a failed removal the
    /// previous contents of `to` are restored.
    fn move_value(
        &mut self,
        entry: &str,
        from: Slot<'_>,
        to: Slot<'_>,
        value: &str,
    ) -> Result<()> {
        let previous = self.lookup(to)?;
        self.write(to.section, to.key, value)?;

        let Err(source) = self
            .store
            .delete_value(&self.base, from.section.store_name(), from.key)
        else {
            return Ok(());
        };

        let undo = match &previous {
            Some(old) => self.write(to.section, to.key, old),
            None => self
                .store
                .delete_value(&self.base, to.section.store_name(), to.key),
        };
        let rolled_back = match undo {
            Ok(()) => true,
            Err(e) => {
                warn!("Could not roll back {} in {}: {}", entry, to.section, e);
                false
            }
        };
        Err(Error::mutation_conflict(
            entry,
            to.section.store_name(),
            from.section.store_name(),
            rolled_back,
            source,
        ))
    }
}

fn require_package(section: Section) -> Result<()> {
    if section.is_package() {
        Ok(())
    } else {
        Err(Error::invalid_section(section.store_name()))
    }
}
