//! Rendering of expert and package lists
//!
//! A render pass covers one installation. It builds one macro table and one
//! duplicate index; when a filename is seen twice both entries are raised to
//! `Duplicate`, including the earlier one rendered before the collision.

use crate::macros::{MacroTable, PathResolver};
use expertmgr_core::store::{ConfigStore, FileProbe};
use expertmgr_core::types::{Entry, HealthStatus, InstallationPath, Section};
use expertmgr_core::utils::duplicate_key;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry as IndexSlot;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, warn};

/// The three lists shown for an installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListKind {
    /// Active and disabled experts
    Experts,
    KnownIdePackages,
    KnownPackages,
}

impl ListKind {
    pub const ALL: [ListKind; 3] = [
        ListKind::Experts,
        ListKind::KnownIdePackages,
        ListKind::KnownPackages,
    ];

    /// List a section's entries are rendered into
    pub fn for_section(section: Section) -> Self {
        match section {
            Section::Experts | Section::DisabledExperts => Self::Experts,
            Section::KnownIdePackages => Self::KnownIdePackages,
            Section::KnownPackages => Self::KnownPackages,
        }
    }

    /// Store sections rendered into this list, in render order
    pub fn sections(self) -> &'static [Section] {
        match self {
            Self::Experts => &[Section::Experts, Section::DisabledExperts],
            Self::KnownIdePackages => &[Section::KnownIdePackages],
            Self::KnownPackages => &[Section::KnownPackages],
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Experts => "Experts",
            Self::KnownIdePackages => "Known IDE Packages",
            Self::KnownPackages => "Known Packages",
        })
    }
}

/// Lists produced by one render pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedEntries {
    /// Active experts followed by disabled experts
    pub experts: Vec<Entry>,
    pub known_ide_packages: Vec<Entry>,
    pub known_packages: Vec<Entry>,
}

impl RenderedEntries {
    pub fn list(&self, kind: ListKind) -> &[Entry] {
        match kind {
            ListKind::Experts => &self.experts,
            ListKind::KnownIdePackages => &self.known_ide_packages,
            ListKind::KnownPackages => &self.known_packages,
        }
    }

    /// Worst entry classification across all lists
    pub fn worst(&self) -> HealthStatus {
        ListKind::ALL
            .iter()
            .flat_map(|kind| self.list(*kind))
            .map(|entry| entry.health)
            .max()
            .unwrap_or_default()
    }
}

/// One render pass over an installation
pub struct EntryListBuilder<'a, S: ConfigStore + ?Sized, P: FileProbe + ?Sized> {
    store: &'a S,
    resolver: PathResolver<'a, P>,
    base: String,
    lists: [Vec<Entry>; 3],
    rendered: HashSet<Section>,
    // filename -> list and row of the first entry with that filename
    duplicates: HashMap<String, (ListKind, usize)>,
}

impl<'a, S: ConfigStore + ?Sized, P: FileProbe + ?Sized> EntryListBuilder<'a, S, P> {
    pub fn new(store: &'a S, probe: &'a P, root: &str, installation: &InstallationPath) -> Self {
        let base = installation.store_path(root);
        let resolver = PathResolver::new(MacroTable::build_for(store, &base), probe);
        Self {
            store,
            resolver,
            base,
            lists: Default::default(),
            rendered: HashSet::new(),
            duplicates: HashMap::new(),
        }
    }

    pub fn macros(&self) -> &MacroTable {
        self.resolver.macros()
    }

    /// Render one section and return the list it was appended to.
    ///
    /// Rendering a section a second time in the same pass is a no-op.
    pub fn build_list(&mut self, section: Section) -> &[Entry] {
        let kind = ListKind::for_section(section);
        if !self.rendered.insert(section) {
            debug!("{} already rendered for {}", section, self.base);
            return &self.lists[kind.index()];
        }

        let pairs = self
            .store
            .enumerate_keys(&self.base, section.store_name())
            .unwrap_or_else(|e| {
                warn!("Could not read {} of {}: {}", section, self.base, e);
                Vec::new()
            });

        for (key, value) in pairs {
            let mut entry = Entry::from_store(section, &key, &value);

            // Disabled packages are shown but never evaluated.
            if section.is_package() && !entry.enabled {
                self.lists[kind.index()].push(entry);
                continue;
            }

            entry.health = if self.resolver.exists(&entry.target_path) {
                HealthStatus::Okay
            } else {
                HealthStatus::InvalidPath
            };

            let row = self.lists[kind.index()].len();
            match self.duplicates.entry(duplicate_key(&entry.target_path)) {
                IndexSlot::Occupied(first) => {
                    let (first_kind, first_row) = *first.get();
                    let first = &mut self.lists[first_kind.index()][first_row];
                    first.health = first.health.max(HealthStatus::Duplicate);
                    entry.health = HealthStatus::Duplicate;
                }
                IndexSlot::Vacant(slot) => {
                    slot.insert((kind, row));
                }
            }
            self.lists[kind.index()].push(entry);
        }
        &self.lists[kind.index()]
    }

    /// Close the pass and hand out the rendered lists
    pub fn finish(self) -> RenderedEntries {
        let [experts, known_ide_packages, known_packages] = self.lists;
        RenderedEntries {
            experts,
            known_ide_packages,
            known_packages,
        }
    }
}

/// Render every list of an installation in the standard order
pub fn render_installation<S, P>(
    store: &S,
    probe: &P,
    root: &str,
    installation: &InstallationPath,
) -> RenderedEntries
where
    S: ConfigStore + ?Sized,
    P: FileProbe + ?Sized,
{
    let mut builder = EntryListBuilder::new(store, probe, root, installation);
    for section in Section::ALL {
        builder.build_list(section);
    }
    builder.finish()
}
