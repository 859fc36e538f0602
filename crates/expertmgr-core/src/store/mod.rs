//! Hierarchical key/value store abstraction
//!
//! The engine never talks to a concrete backing store. Everything it needs is
//! expressed by [`ConfigStore`] (sections addressed by slash-delimited paths)
//! and [`FileProbe`] (the only operation that touches the filesystem).

mod memory;
mod yaml;

pub use memory::{MemoryStore, SectionNode};
pub use yaml::YamlStore;

use crate::error::Result;
use std::path::Path;

/// Hierarchical configuration store
///
/// `base_path` addresses a section from the store root; `section` is a path
/// relative to it (the empty string addresses `base_path` itself).
pub trait ConfigStore {
    /// Names of the immediate subsections of `base_path`, in store order.
    ///
    /// Fails with `StoreUnavailable` when `base_path` does not exist.
    fn enumerate_sections(&self, base_path: &str) -> Result<Vec<String>>;

    /// `(key, value)` pairs of a section, in store order. A missing section
    /// has no keys.
    fn enumerate_keys(&self, base_path: &str, section: &str) -> Result<Vec<(String, String)>>;

    /// Read a value, falling back to `default` when it is absent
    fn read_string(&self, base_path: &str, section: &str, key: &str, default: &str)
        -> Result<String>;

    /// Write a value, creating sections as needed
    fn write_string(&mut self, base_path: &str, section: &str, key: &str, value: &str)
        -> Result<()>;

    /// Remove a value; removing an absent value succeeds
    fn delete_value(&mut self, base_path: &str, section: &str, key: &str) -> Result<()>;
}

/// File-existence predicate injected into path resolution
pub trait FileProbe {
    fn exists(&self, path: &str) -> bool;
}

impl<F> FileProbe for F
where
    F: Fn(&str) -> bool,
{
    fn exists(&self, path: &str) -> bool {
        self(path)
    }
}

/// File probe backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileProbe;

impl FileProbe for OsFileProbe {
    fn exists(&self, path: &str) -> bool {
        Path::new(path).is_file()
    }
}

/// Split a slash-delimited path into its non-empty segments
pub(crate) fn segments<'a>(base_path: &'a str, section: &'a str) -> Vec<&'a str> {
    base_path
        .split('/')
        .chain(section.split('/'))
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_segments_join_base_and_section() {
        assert_eq!(
            segments("Software/Embarcadero/", "Experts/Disabled"),
            vec!["Software", "Embarcadero", "Experts", "Disabled"]
        );
        assert_eq!(segments("Software", ""), vec!["Software"]);
    }

    #[test]
    fn test_os_probe_reports_files_only() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("expert.dll");
        File::create(&file).unwrap();

        let probe = OsFileProbe;
        assert!(probe.exists(file.to_str().unwrap()));
        assert!(!probe.exists(temp.path().to_str().unwrap()));
        assert!(!probe.exists(temp.path().join("missing.dll").to_str().unwrap()));
    }

    #[test]
    fn test_closure_probe() {
        let probe = |path: &str| path.ends_with(".bpl");
        assert!(probe.exists(r"C:\x.bpl"));
        assert!(!probe.exists(r"C:\x.dll"));
    }
}
