//! Mock implementations for testing
//!
//! Provides a file probe that answers from a fixed set of paths and a store
//! wrapper that fails selected operations.

#![allow(dead_code)]

use expertmgr_core::error::{Error, Result};
use expertmgr_core::store::{ConfigStore, FileProbe};
use expertmgr_core::MemoryStore;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// File probe backed by a set of existing paths
#[derive(Clone, Default)]
pub struct MockFileProbe {
    files: HashSet<String>,
    /// Recorded probe calls
    probes: Arc<Mutex<Vec<String>>>,
}

impl MockFileProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_files<I, F>(files: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            probes: Arc::default(),
        }
    }

    pub fn add_file(&mut self, path: impl Into<String>) {
        self.files.insert(path.into());
    }

    /// Paths probed so far, in call order
    pub fn probed(&self) -> Vec<String> {
        self.probes.lock().unwrap().clone()
    }
}

impl FileProbe for MockFileProbe {
    fn exists(&self, path: &str) -> bool {
        self.probes.lock().unwrap().push(path.to_string());
        self.files.contains(path)
    }
}

/// Store that fails deletes in one section and/or enumeration of one path
pub struct FlakyStore {
    inner: MemoryStore,
    failing_delete_section: Option<String>,
    failing_write_section: Option<String>,
    unavailable_path: Option<String>,
}

impl FlakyStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            failing_delete_section: None,
            failing_write_section: None,
            unavailable_path: None,
        }
    }

    /// Fail every delete in `section`
    pub fn failing_deletes_in(mut self, section: &str) -> Self {
        self.failing_delete_section = Some(section.to_string());
        self
    }

    /// Fail every write in `section`
    pub fn failing_writes_in(mut self, section: &str) -> Self {
        self.failing_write_section = Some(section.to_string());
        self
    }

    /// Report `path` as unavailable when enumerating its subsections
    pub fn unavailable(mut self, path: &str) -> Self {
        self.unavailable_path = Some(path.to_string());
        self
    }

    pub fn heal(&mut self) {
        self.failing_delete_section = None;
        self.failing_write_section = None;
        self.unavailable_path = None;
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

impl ConfigStore for FlakyStore {
    fn enumerate_sections(&self, base_path: &str) -> Result<Vec<String>> {
        if self.unavailable_path.as_deref() == Some(base_path) {
            return Err(Error::store_unavailable(base_path));
        }
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
        if self.failing_write_section.as_deref() == Some(section) {
            return Err(Error::store(format!("write denied in {}", section)));
        }
        self.inner.write_string(base_path, section, key, value)
    }

    fn delete_value(&mut self, base_path: &str, section: &str, key: &str) -> Result<()> {
        if self.failing_delete_section.as_deref() == Some(section) {
            return Err(Error::store(format!("delete denied in {}", section)));
        }
        self.inner.delete_value(base_path, section, key)
    }
}
