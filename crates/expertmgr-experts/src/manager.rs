//! Session facade
//!
//! [`ExpertManager`] owns the store, the current tree snapshot and the view
//! state for one session, and wires the scanner, renderer and editor together.

use crate::editor::EntryEditor;
use crate::entries::{render_installation, ListKind, RenderedEntries};
use crate::macros::MacroTable;
use crate::scanner::{CancelToken, InstallationScanner};
use crate::validator::{ValidationReport, Validator};
use crate::view_state::ViewStateTracker;
use expertmgr_core::error::{Error, Result};
use expertmgr_core::store::{ConfigStore, FileProbe, YamlStore};
use expertmgr_core::types::{Entry, HealthStatus, InstallationNode, InstallationPath, InstallationTree};
use expertmgr_core::ManagerConfig;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// Scope during which check-box changes come from rendering, not the operator.
///
/// Clones share one counter. A presentation layer whose widget callbacks fire
/// while lists are being filled keeps a clone (see
/// [`ExpertManager::suppression`]) and checks [`Suppression::is_active`]
/// before forwarding a change to [`ExpertManager::on_entry_checked`].
#[derive(Debug, Clone, Default)]
pub struct Suppression(Arc<AtomicUsize>);

impl Suppression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress until the returned guard is dropped
    pub fn enter(&self) -> SuppressionGuard {
        self.0.fetch_add(1, Ordering::SeqCst);
        SuppressionGuard(Arc::clone(&self.0))
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::SeqCst) > 0
    }
}

/// Releases its suppression scope on drop
#[must_use = "suppression ends as soon as the guard is dropped"]
#[derive(Debug)]
pub struct SuppressionGuard(Arc<AtomicUsize>);

impl Drop for SuppressionGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Rendered lists of the selected installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSelection {
    pub installation: InstallationPath,
    pub entries: RenderedEntries,

    /// Row to select in each list, where one survives the re-render
    pub rows: BTreeMap<ListKind, usize>,
}

/// One operator session over a store
pub struct ExpertManager<S: ConfigStore, P: FileProbe> {
    store: S,
    probe: P,
    scanner: InstallationScanner,
    tree: Arc<InstallationTree>,
    view_state: ViewStateTracker,
    suppression: Suppression,
}

impl<P: FileProbe> ExpertManager<YamlStore, P> {
    /// Open the configured YAML store
    pub fn open(config: &ManagerConfig, probe: P) -> Result<Self> {
        let store = YamlStore::open(config.store_path.clone())?;
        Ok(Self::new(store, probe, InstallationScanner::from_config(config)))
    }
}

impl<S: ConfigStore, P: FileProbe> ExpertManager<S, P> {
    /// Create a session; the tree stays empty until [`Self::rescan`]
    pub fn new(store: S, probe: P, scanner: InstallationScanner) -> Self {
        Self {
            store,
            probe,
            scanner,
            tree: Arc::new(InstallationTree::default()),
            view_state: ViewStateTracker::new(),
            suppression: Suppression::new(),
        }
    }

    pub fn with_view_state(mut self, view_state: ViewStateTracker) -> Self {
        self.view_state = view_state;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn scanner(&self) -> &InstallationScanner {
        &self.scanner
    }

    /// Current snapshot; earlier snapshots stay valid after a rescan
    pub fn tree(&self) -> Arc<InstallationTree> {
        Arc::clone(&self.tree)
    }

    pub fn view_state(&self) -> &ViewStateTracker {
        &self.view_state
    }

    pub fn view_state_mut(&mut self) -> &mut ViewStateTracker {
        &mut self.view_state
    }

    pub fn suppression(&self) -> &Suppression {
        &self.suppression
    }

    /// Rebuild the tree from the store and swap it in
    pub fn rescan(&mut self) -> Arc<InstallationTree> {
        self.rescan_with_cancel(&CancelToken::new())
    }

    pub fn rescan_with_cancel(&mut self, cancel: &CancelToken) -> Arc<InstallationTree> {
        let tree = self
            .scanner
            .scan_with_cancel(&self.store, &self.probe, cancel);
        self.tree = Arc::new(tree);
        self.tree()
    }

    /// Select a node of the current tree.
    ///
    /// Returns `None` and keeps the previous selection when the path is not
    /// in the tree.
    pub fn select(&mut self, logical_path: &str) -> Option<&InstallationNode> {
        if self.tree.find(logical_path).is_none() {
            debug!("Cannot select {}: not in tree", logical_path);
            return None;
        }
        self.view_state.remember_selection(logical_path);
        self.tree.find(logical_path)
    }

    pub fn selected(&self) -> Option<&InstallationNode> {
        self.view_state.resolve_selection(&self.tree)
    }

    /// Render the lists of one installation
    pub fn render(&self, installation: &InstallationPath) -> RenderedEntries {
        render_installation(&self.store, &self.probe, self.scanner.root(), installation)
    }

    /// Render the selected installation and work out which rows to keep
    /// selected. `current_rows` holds the rows selected before the render.
    ///
    /// Nothing is rendered when the selection is not a viewable installation.
    /// The suppression scope is held for the whole call, so callbacks that
    /// check a cloned [`Suppression`] see it as active.
    pub fn render_selected(
        &mut self,
        current_rows: &HashMap<ListKind, usize>,
    ) -> Option<RenderedSelection> {
        let _guard = self.suppression.enter();

        let node = self.view_state.resolve_selection(&self.tree)?;
        if !node.health.is_viewable() {
            trace!("{} is not viewable", node.logical_path);
            return None;
        }
        let installation = node.installation_path()?;
        let entries = render_installation(&self.store, &self.probe, self.scanner.root(), &installation);

        let mut rows = BTreeMap::new();
        for kind in ListKind::ALL {
            let scope = format!("{}/{}", installation, kind);
            let row = self.view_state.track_list_position(
                kind,
                &scope,
                current_rows.get(&kind).copied(),
                entries.list(kind).len(),
            );
            if let Some(row) = row {
                rows.insert(kind, row);
            }
        }

        Some(RenderedSelection {
            installation,
            entries,
            rows,
        })
    }

    /// Macro table of one installation
    pub fn macros(&self, installation: &InstallationPath) -> MacroTable {
        MacroTable::build_for(&self.store, &installation.store_path(self.scanner.root()))
    }

    pub fn report(&self, installation: &InstallationPath) -> ValidationReport {
        Validator::new(&self.store, &self.probe, self.scanner.root()).report(installation)
    }

    /// Mutations for the installation at `logical_path`; each one updates the
    /// current tree snapshot
    pub fn editor(&mut self, logical_path: &str) -> Result<EntryEditor<'_, S, P>> {
        Ok(
            EntryEditor::for_path(&mut self.store, &self.probe, self.scanner.root(), logical_path)?
                .with_tree(&mut self.tree),
        )
    }

    /// Check-box handler for the selected installation's lists.
    ///
    /// Ignored while a suppression scope is active or when the state is
    /// unchanged; otherwise toggles the entry and returns the new health of
    /// the installation.
    pub fn on_entry_checked(&mut self, entry: &Entry, checked: bool) -> Result<Option<HealthStatus>> {
        if self.suppression.is_active() {
            trace!("Ignoring check change for {} during update", entry.name);
            return Ok(None);
        }
        if entry.enabled == checked {
            return Ok(None);
        }

        let logical_path = self
            .view_state
            .selection()
            .map(str::to_string)
            .ok_or_else(|| Error::not_an_installation("no selection"))?;
        let mut editor = self.editor(&logical_path)?;
        let health = if entry.section.is_package() {
            editor.set_package_enabled(entry.section, &entry.target_path, &entry.name, checked)?
        } else {
            editor.set_expert_enabled(&entry.name, &entry.target_path, checked)?
        };
        Ok(Some(health))
    }
}
