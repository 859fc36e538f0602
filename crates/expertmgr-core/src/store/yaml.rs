//! YAML file backed store
//!
//! The document is a nested map of sections:
//!
//! ```yaml
//! sections:
//!   Software:
//!     sections:
//!       Embarcadero:
//!         sections:
//!           BDS:
//!             sections:
//!               "22.0":
//!                 values:
//!                   RootDir: 'C:\Program Files (x86)\Embarcadero\Studio\22.0'
//!                 sections:
//!                   Experts:
//!                     values:
//!                       GExperts: 'C:\GExperts\GExpertsRS11.dll'
//! ```
//!
//! Every mutation is written back to disk before returning. A mutation whose
//! save fails leaves both the file and the in-memory document unchanged.

use super::{ConfigStore, MemoryStore, SectionNode};
use crate::error::Result;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

/// Store persisted as a YAML document
#[derive(Debug)]
pub struct YamlStore {
    path: Utf8PathBuf,
    inner: MemoryStore,
}

impl YamlStore {
    /// Open a store file; a missing file starts an empty store
    pub fn open(path: impl Into<Utf8PathBuf>) -> Result<Self> {
        let path = path.into();
        let inner = if path.exists() {
            debug!("Loading store from: {}", path);
            let content = std::fs::read_to_string(&path)?;
            let root: SectionNode = if content.trim().is_empty() {
                SectionNode::default()
            } else {
                serde_yaml_ng::from_str(&content)?
            };
            MemoryStore::from_root(root)
        } else {
            info!("Store file {} does not exist, starting empty", path);
            MemoryStore::new()
        };
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Write the current document to disk
    pub fn save(&self) -> Result<()> {
        write_document(&self.path, self.inner.root())
    }

    /// Apply `mutate` to a copy of the document and keep it only once saved
    fn commit(&mut self, mutate: impl FnOnce(&mut MemoryStore) -> Result<()>) -> Result<()> {
        let mut next = self.inner.clone();
        mutate(&mut next)?;
        write_document(&self.path, next.root())?;
        self.inner = next;
        Ok(())
    }
}

fn write_document(path: &Utf8Path, root: &SectionNode) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let content = serde_yaml_ng::to_string(root)?;
    std::fs::write(path, content)?;
    debug!("Saved store to: {}", path);
    Ok(())
}

impl ConfigStore for YamlStore {
    fn enumerate_sections(&self, base_path: &str) -> Result<Vec<String>> {
        self.inner.enumerate_sections(base_path)
    }

    fn enumerate_keys(&self, base_path: &str, section: &str) -> Result<Vec<(String, String)>> {
        self.inner.enumerate_keys(base_path, section)
    }

    fn read_string(
        &self,
        base_path: &str,
        section: &str,
        key: &str,
        default: &str,
    ) -> Result<String> {
        self.inner.read_string(base_path, section, key, default)
    }

    fn write_string(
        &mut self,
        base_path: &str,
        section: &str,
        key: &str,
        value: &str,
    ) -> Result<()> {
        self.commit(|store| store.write_string(base_path, section, key, value))
    }

    fn delete_value(&mut self, base_path: &str, section: &str, key: &str) -> Result<()> {
        self.commit(|store| store.delete_value(base_path, section, key))
    }
}
