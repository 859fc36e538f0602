//! In-memory ordered store

use super::{segments, ConfigStore};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One section of the hierarchy: its values and its subsections, both in
/// insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionNode {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub values: IndexMap<String, String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub sections: IndexMap<String, SectionNode>,
}

impl SectionNode {
    fn lookup(&self, path: &[&str]) -> Option<&SectionNode> {
        path.iter()
            .try_fold(self, |node, name| node.sections.get(*name))
    }

    fn lookup_mut(&mut self, path: &[&str]) -> Option<&mut SectionNode> {
        path.iter()
            .try_fold(self, |node, name| node.sections.get_mut(*name))
    }

    fn lookup_or_create(&mut self, path: &[&str]) -> &mut SectionNode {
        path.iter().fold(self, |node, name| {
            node.sections.entry((*name).to_string()).or_default()
        })
    }
}

/// Store that keeps the whole hierarchy in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    root: SectionNode,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_root(root: SectionNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &SectionNode {
        &self.root
    }

    /// Create a section (and its ancestors) without adding values
    pub fn ensure_section(&mut self, path: &str) {
        self.root.lookup_or_create(&segments(path, ""));
    }

    /// Whether a value is present
    pub fn contains(&self, base_path: &str, section: &str, key: &str) -> bool {
        self.root
            .lookup(&segments(base_path, section))
            .is_some_and(|node| node.values.contains_key(key))
    }
}

impl ConfigStore for MemoryStore {
    fn enumerate_sections(&self, base_path: &str) -> Result<Vec<String>> {
        self.root
            .lookup(&segments(base_path, ""))
            .map(|node| node.sections.keys().cloned().collect())
            .ok_or_else(|| Error::store_unavailable(base_path))
    }

    fn enumerate_keys(&self, base_path: &str, section: &str) -> Result<Vec<(String, String)>> {
        Ok(self
            .root
            .lookup(&segments(base_path, section))
            .map(|node| {
                node.values
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn read_string(
        &self,
        base_path: &str,
        section: &str,
        key: &str,
        default: &str,
    ) -> Result<String> {
        Ok(self
            .root
            .lookup(&segments(base_path, section))
            .and_then(|node| node.values.get(key))
            .cloned()
            .unwrap_or_else(|| default.to_string()))
    }

    fn write_string(
        &mut self,
        base_path: &str,
        section: &str,
        key: &str,
        value: &str,
    ) -> Result<()> {
        self.root
            .lookup_or_create(&segments(base_path, section))
            .values
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete_value(&mut self, base_path: &str, section: &str, key: &str) -> Result<()> {
        if let Some(node) = self.root.lookup_mut(&segments(base_path, section)) {
            node.values.shift_remove(key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "Software/Embarcadero/BDS/22.0";

    #[test]
    fn test_enumeration_keeps_insertion_order() {
        let mut store = MemoryStore::new();
        store.write_string(BASE, "Experts", "Zeta", "z.dll").unwrap();
        store.write_string(BASE, "Experts", "Alpha", "a.dll").unwrap();
        store.ensure_section("Software/Embarcadero/BDS/21.0");

        let keys = store.enumerate_keys(BASE, "Experts").unwrap();
        assert_eq!(
            keys,
            vec![
                ("Zeta".to_string(), "z.dll".to_string()),
                ("Alpha".to_string(), "a.dll".to_string())
            ]
        );
        assert_eq!(
            store.enumerate_sections("Software/Embarcadero/BDS").unwrap(),
            vec!["22.0", "21.0"]
        );
    }

    #[test]
    fn test_missing_base_is_unavailable() {
        let store = MemoryStore::new();
        let err = store.enumerate_sections("Software/Borland").unwrap_err();
        assert!(matches!(err, Error::StoreUnavailable { .. }));
    }

    #[test]
    fn test_missing_section_has_no_keys_and_defaults() {
        let store = MemoryStore::new();
        assert!(store.enumerate_keys(BASE, "Known Packages").unwrap().is_empty());
        assert_eq!(store.read_string(BASE, "", "RootDir", "n/a").unwrap(), "n/a");
    }

    #[test]
    fn test_delete_preserves_order_of_remaining_values() {
        let mut store = MemoryStore::new();
        for key in ["a", "b", "c"] {
            store.write_string(BASE, "Experts", key, key).unwrap();
        }
        store.delete_value(BASE, "Experts", "b").unwrap();
        store.delete_value(BASE, "Experts", "missing").unwrap();
        store.delete_value("Nowhere", "Experts", "a").unwrap();

        let keys: Vec<String> = store
            .enumerate_keys(BASE, "Experts")
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["a", "c"]);
        assert!(!store.contains(BASE, "Experts", "b"));
    }

    #[test]
    fn test_nested_section_names() {
        let mut store = MemoryStore::new();
        store
            .write_string(BASE, "Experts/Disabled", "Old", "old.dll")
            .unwrap();
        assert!(store.contains(BASE, "Experts/Disabled", "Old"));
        assert_eq!(store.enumerate_sections(&format!("{}/Experts", BASE)).unwrap(), vec!["Disabled"]);
    }
}
