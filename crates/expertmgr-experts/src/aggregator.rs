//! Health aggregation over the installation tree
//!
//! Only version nodes carry their own classification. Vendor and family nodes
//! are displayed with the worst classification found below them, computed on
//! demand so that a health update never has to touch ancestors.

use expertmgr_core::types::{HealthStatus, InstallationNode, InstallationTree};

/// Worst classification of a node and all of its descendants
pub fn highest_severity(node: &InstallationNode) -> HealthStatus {
    node.children
        .iter()
        .map(highest_severity)
        .fold(node.health, HealthStatus::max)
}

/// Whether the node is an installation the operator can open
pub fn is_viewable(node: &InstallationNode) -> bool {
    node.health.is_viewable()
}

/// Worst classification anywhere in the tree
pub fn tree_severity(tree: &InstallationTree) -> HealthStatus {
    tree.vendors
        .iter()
        .map(highest_severity)
        .max()
        .unwrap_or_default()
}
