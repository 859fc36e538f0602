//! View state that survives tree rebuilds
//!
//! Every rescan produces brand new nodes, so expansion and selection are
//! remembered by logical path instead of by node.

use crate::entries::ListKind;
use expertmgr_core::types::{InstallationNode, InstallationTree};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::trace;

/// Persisted layout of the tracked state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedViewState {
    #[serde(default)]
    pub expanded_nodes: BTreeMap<String, bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_node: Option<String>,
}

/// Last render of one list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ListPosition {
    scope: Option<String>,
    row: Option<usize>,
}

/// Expanded nodes, selected node and list positions keyed by logical path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewStateTracker {
    expanded: BTreeMap<String, bool>,
    selected: Option<String>,
    positions: HashMap<ListKind, ListPosition>,
}

impl ViewStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the expanded state of every node of `tree`
    pub fn capture<F>(&mut self, tree: &InstallationTree, is_expanded: F)
    where
        F: Fn(&InstallationNode) -> bool,
    {
        for node in tree.iter() {
            self.expanded
                .insert(node.logical_path.clone(), is_expanded(node));
        }
    }

    /// Logical paths of `tree` that were expanded before the rebuild.
    ///
    /// Nodes never seen before stay collapsed; remembered paths missing from
    /// the new tree are ignored but kept.
    pub fn restore(&self, tree: &InstallationTree) -> BTreeSet<String> {
        tree.iter()
            .filter(|node| self.is_expanded(&node.logical_path))
            .map(|node| node.logical_path.clone())
            .collect()
    }

    pub fn set_expanded(&mut self, logical_path: &str, expanded: bool) {
        self.expanded.insert(logical_path.to_string(), expanded);
    }

    pub fn is_expanded(&self, logical_path: &str) -> bool {
        self.expanded.get(logical_path).copied().unwrap_or(false)
    }

    pub fn remember_selection(&mut self, logical_path: impl Into<String>) {
        self.selected = Some(logical_path.into());
    }

    pub fn selection(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Node of `tree` matching the remembered selection
    pub fn resolve_selection<'t>(&self, tree: &'t InstallationTree) -> Option<&'t InstallationNode> {
        let path = self.selected.as_deref()?;
        let node = tree.find(path);
        if node.is_none() {
            trace!("Selected node {} is gone", path);
        }
        node
    }

    /// Row to select after re-rendering `list` for `scope`.
    ///
    /// An unchanged scope keeps `selected_before`, clamped to the last row;
    /// a new scope starts without a selection.
    pub fn track_list_position(
        &mut self,
        list: ListKind,
        scope: &str,
        selected_before: Option<usize>,
        row_count: usize,
    ) -> Option<usize> {
        let position = self.positions.entry(list).or_default();
        let row = if position.scope.as_deref() == Some(scope) {
            selected_before.and_then(|row| row_count.checked_sub(1).map(|last| row.min(last)))
        } else {
            None
        };
        position.scope = Some(scope.to_string());
        position.row = row;
        row
    }

    /// Row selected at the last render of `list`
    pub fn list_position(&self, list: ListKind) -> Option<usize> {
        self.positions.get(&list).and_then(|p| p.row)
    }

    pub fn to_persisted(&self) -> PersistedViewState {
        PersistedViewState {
            expanded_nodes: self.expanded.clone(),
            selected_node: self.selected.clone(),
        }
    }

    pub fn from_persisted(state: PersistedViewState) -> Self {
        Self {
            expanded: state.expanded_nodes,
            selected: state.selected_node,
            positions: HashMap::new(),
        }
    }
}
