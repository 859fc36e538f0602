//! Installation discovery
//!
//! Walks `root/vendor/family/version` in the store and builds a fresh
//! [`InstallationTree`], classifying every version node on the way.

use crate::validator::Validator;
use expertmgr_core::store::{ConfigStore, FileProbe};
use expertmgr_core::types::{
    join_path, InstallationNode, InstallationPath, InstallationTree, NodeLevel,
};
use expertmgr_core::ManagerConfig;
use regex::Regex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, trace};

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+$").expect("version regex is valid"));

/// Vendor roots searched when no configuration is supplied
pub const DEFAULT_VENDORS: [&str; 3] = ["Borland", "CodeGear", "Embarcadero"];

/// Store section holding the vendor roots by default
pub const DEFAULT_ROOT: &str = "Software";

/// Whether a subsection label names a `major.minor` installation
pub fn is_version_label(label: &str) -> bool {
    VERSION_RE.is_match(label)
}

/// Cooperative cancellation flag for whole-tree scans
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Builds installation trees from a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationScanner {
    root: String,
    vendors: Vec<String>,
}

impl Default for InstallationScanner {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT, DEFAULT_VENDORS)
    }
}

impl InstallationScanner {
    pub fn new<I, V>(root: impl Into<String>, vendors: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            root: root.into(),
            vendors: vendors.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &ManagerConfig) -> Self {
        Self::new(config.root.clone(), config.vendors.iter().cloned())
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn vendors(&self) -> &[String] {
        &self.vendors
    }

    /// Scan every configured vendor
    pub fn scan<S, P>(&self, store: &S, probe: &P) -> InstallationTree
    where
        S: ConfigStore + ?Sized,
        P: FileProbe + ?Sized,
    {
        self.scan_with_cancel(store, probe, &CancelToken::new())
    }

    /// Scan vendors until done or until `cancel` is raised.
    ///
    /// Cancellation is observed between vendors only, so every vendor in the
    /// returned tree is complete.
    pub fn scan_with_cancel<S, P>(
        &self,
        store: &S,
        probe: &P,
        cancel: &CancelToken,
    ) -> InstallationTree
    where
        S: ConfigStore + ?Sized,
        P: FileProbe + ?Sized,
    {
        let validator = Validator::new(store, probe, self.root.as_str());
        let mut vendors = Vec::with_capacity(self.vendors.len());

        for vendor in &self.vendors {
            if cancel.is_cancelled() {
                info!(
                    "Scan cancelled after {} of {} vendors",
                    vendors.len(),
                    self.vendors.len()
                );
                return InstallationTree::new(vendors, false);
            }
            vendors.push(self.scan_vendor(store, &validator, vendor));
        }

        let tree = InstallationTree::new(vendors, true);
        debug!(
            "Scanned {} installations under {}",
            tree.installations().count(),
            self.root
        );
        tree
    }

    fn scan_vendor<S, P>(
        &self,
        store: &S,
        validator: &Validator<'_, S, P>,
        vendor: &str,
    ) -> InstallationNode
    where
        S: ConfigStore + ?Sized,
        P: FileProbe + ?Sized,
    {
        let mut node = InstallationNode::vendor(vendor);
        let vendor_path = join_path(&self.root, vendor);

        let families = match store.enumerate_sections(&vendor_path) {
            Ok(families) => families,
            Err(e) => {
                debug!("Skipping vendor {}: {}", vendor, e);
                return node;
            }
        };

        for family in families {
            if family.contains('/') {
                trace!("Ignoring family label {}/{} containing '/'", vendor, family);
                continue;
            }
            let family_node = self.scan_family(store, validator, &node.logical_path, &family);
            match family_node {
                Some(family_node) => node.children.push(family_node),
                None => trace!("Pruned family {}/{} with no versions", vendor, family),
            }
        }
        node
    }

    fn scan_family<S, P>(
        &self,
        store: &S,
        validator: &Validator<'_, S, P>,
        vendor_path: &str,
        family: &str,
    ) -> Option<InstallationNode>
    where
        S: ConfigStore + ?Sized,
        P: FileProbe + ?Sized,
    {
        let mut node = InstallationNode::child(vendor_path, family, NodeLevel::Family);
        let family_store_path = join_path(&self.root, &node.logical_path);

        let versions = match store.enumerate_sections(&family_store_path) {
            Ok(versions) => versions,
            Err(e) => {
                debug!("Skipping family {}: {}", node.logical_path, e);
                return None;
            }
        };

        for version in versions {
            if !is_version_label(&version) {
                trace!("Ignoring non-version section {}/{}", node.logical_path, version);
                continue;
            }
            let mut version_node =
                InstallationNode::child(&node.logical_path, version.as_str(), NodeLevel::Version);
            let installation = InstallationPath::new(vendor_path, family, version);
            version_node.health = validator.validate(&installation);
            node.children.push(version_node);
        }

        (!node.children.is_empty()).then_some(node)
    }
}
