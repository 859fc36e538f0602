//! Installation tree types
//!
//! The tree mirrors the store hierarchy `vendor/family/version`. Nodes are
//! addressed by their logical path, which is derived from the labels of the
//! node and its ancestors and therefore stays stable across rescans.

use crate::error::{Error, Result};
use crate::types::HealthStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator used in logical paths and store paths
pub const PATH_SEPARATOR: char = '/';

/// Join a parent logical path and a child label
pub fn join_path(parent: &str, label: &str) -> String {
    if parent.is_empty() {
        label.to_string()
    } else {
        format!("{}{}{}", parent, PATH_SEPARATOR, label)
    }
}

/// Level of a node in the installation tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeLevel {
    Vendor,
    Family,
    Version,
}

/// Address of one versioned installation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstallationPath {
    pub vendor: String,
    pub family: String,
    pub version: String,
}

impl InstallationPath {
    pub fn new(
        vendor: impl Into<String>,
        family: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            vendor: vendor.into(),
            family: family.into(),
            version: version.into(),
        }
    }

    /// Parse a `vendor/family/version` logical path
    pub fn parse(logical_path: &str) -> Result<Self> {
        let parts: Vec<&str> = logical_path.split(PATH_SEPARATOR).collect();
        match parts.as_slice() {
            [vendor, family, version]
                if !vendor.is_empty() && !family.is_empty() && !version.is_empty() =>
            {
                Ok(Self::new(*vendor, *family, *version))
            }
            _ => Err(Error::not_an_installation(logical_path)),
        }
    }

    /// Logical path (`vendor/family/version`)
    pub fn logical_path(&self) -> String {
        join_path(&join_path(&self.vendor, &self.family), &self.version)
    }

    /// Path of the installation's base section in the store
    pub fn store_path(&self, root: &str) -> String {
        join_path(root, &self.logical_path())
    }
}

impl fmt::Display for InstallationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.logical_path())
    }
}

/// One node of the installation tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallationNode {
    /// Display text (vendor name, family name or version string)
    pub label: String,

    /// Stable key built from the ancestor labels
    pub logical_path: String,

    /// Depth in the hierarchy
    pub level: NodeLevel,

    /// Own classification; `None` for vendor and family nodes
    pub health: HealthStatus,

    /// Children in store enumeration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<InstallationNode>,
}

impl InstallationNode {
    pub fn vendor(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            logical_path: label.clone(),
            label,
            level: NodeLevel::Vendor,
            health: HealthStatus::None,
            children: Vec::new(),
        }
    }

    /// Create a child node below `parent_path`
    pub fn child(parent_path: &str, label: impl Into<String>, level: NodeLevel) -> Self {
        let label = label.into();
        Self {
            logical_path: join_path(parent_path, &label),
            label,
            level,
            health: HealthStatus::None,
            children: Vec::new(),
        }
    }

    /// Whether this node is a version-level installation
    pub fn is_installation(&self) -> bool {
        self.level == NodeLevel::Version
    }

    /// Installation address for version-level nodes
    pub fn installation_path(&self) -> Option<InstallationPath> {
        if self.is_installation() {
            InstallationPath::parse(&self.logical_path).ok()
        } else {
            None
        }
    }

    /// Find a descendant (or self) by logical path
    pub fn find(&self, logical_path: &str) -> Option<&InstallationNode> {
        if self.logical_path == logical_path {
            return Some(self);
        }
        if !is_ancestor_path(&self.logical_path, logical_path) {
            return None;
        }
        self.children.iter().find_map(|c| c.find(logical_path))
    }

    fn find_mut(&mut self, logical_path: &str) -> Option<&mut InstallationNode> {
        if self.logical_path == logical_path {
            return Some(self);
        }
        if !is_ancestor_path(&self.logical_path, logical_path) {
            return None;
        }
        self.children
            .iter_mut()
            .find_map(|c| c.find_mut(logical_path))
    }

    /// Depth-first, pre-order iteration over this node and its descendants
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter { stack: vec![self] }
    }
}

fn is_ancestor_path(ancestor: &str, path: &str) -> bool {
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path[ancestor.len()..].starts_with(PATH_SEPARATOR)
}

/// Pre-order iterator over a subtree
pub struct NodeIter<'a> {
    stack: Vec<&'a InstallationNode>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a InstallationNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Snapshot produced by one scan of the store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallationTree {
    /// Vendor nodes in configured order
    pub vendors: Vec<InstallationNode>,

    /// False when the scan was cancelled before every vendor was visited
    pub complete: bool,
}

impl InstallationTree {
    pub fn new(vendors: Vec<InstallationNode>, complete: bool) -> Self {
        Self { vendors, complete }
    }

    /// Find a node anywhere in the tree by logical path
    pub fn find(&self, logical_path: &str) -> Option<&InstallationNode> {
        self.vendors.iter().find_map(|v| v.find(logical_path))
    }

    /// Pre-order iteration over every node
    pub fn iter(&self) -> impl Iterator<Item = &InstallationNode> {
        self.vendors.iter().flat_map(InstallationNode::iter)
    }

    /// All version-level installation nodes
    pub fn installations(&self) -> impl Iterator<Item = &InstallationNode> {
        self.iter().filter(|n| n.is_installation())
    }

    /// Replace the health of one installation.
    ///
    /// Returns false when the path does not address an installation in this tree.
    pub fn set_health(&mut self, logical_path: &str, health: HealthStatus) -> bool {
        match self
            .vendors
            .iter_mut()
            .find_map(|v| v.find_mut(logical_path))
        {
            Some(node) if node.is_installation() => {
                node.health = health;
                true
            }
            _ => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }
}
